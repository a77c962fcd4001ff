use std::time::{Duration, Instant};

use colored::*;
use hostmap_common::network::host::HostRecord;
use hostmap_core::inventory::InventoryService;

use crate::api::HostsResponse;
use crate::mprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn list(service: InventoryService, json: bool) -> anyhow::Result<()> {
    if json {
        let hosts: Vec<HostRecord> = service.snapshot().await;
        println!("{}", serde_json::to_string_pretty(&HostsResponse::new(&hosts))?);
        return Ok(());
    }

    print::header("building inventory");
    let ranges: Vec<String> = service.config().ranges.iter().map(|r| r.to_string()).collect();
    let spinner = spinner::start(&format!("Sweeping {}", ranges.join(", ")));

    let start_time: Instant = Instant::now();
    let hosts: Vec<HostRecord> = service.snapshot().await;

    spinner.finish_and_clear();

    inventory_ends(&hosts, start_time.elapsed());
    Ok(())
}

fn inventory_ends(hosts: &[HostRecord], total_time: Duration) {
    if hosts.is_empty() {
        print::header("zero hosts");
        print::no_results();
        return;
    }

    print::header("host inventory");
    print_hosts(hosts);
    print_summary(hosts, total_time);
}

fn print_hosts(hosts: &[HostRecord]) {
    for (idx, host) in hosts.iter().enumerate() {
        print::host_tree(idx, &host.hostname, &format::host_to_details(host));
        if idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_summary(hosts: &[HostRecord], total_time: Duration) {
    let online = hosts.iter().filter(|h| h.is_online()).count();
    let known: ColoredString = format!("{} hosts", hosts.len()).bold().green();
    let online: ColoredString = format!("{online} online").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!("Inventory Complete: {known} ({online}) in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    print::fat_separator();
    print::centerln(&output);
}
