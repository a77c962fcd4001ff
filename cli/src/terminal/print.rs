use colored::*;
use tracing::info;

use crate::terminal::colors;
use crate::terminal::format::Detail;
use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

/// `─────⟦ TITLE ⟧─────`, padded to [`TOTAL_WIDTH`].
pub fn header(title: &str) {
    let label = format!("⟦ {} ⟧", title.to_uppercase());
    let fill = TOTAL_WIDTH.saturating_sub(label.chars().count());
    let (left, right) = (fill / 2, fill - fill / 2);

    print(&format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        label.bright_green(),
        "─".repeat(right).bright_black()
    ));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

/// One host as a numbered head line followed by its details as branches.
///
/// Keys are dot-padded to the widest key so the colons line up.
pub fn host_tree(idx: usize, name: &str, details: &[Detail]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    let key_width = details.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;

    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(key_width - key.len()).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let pad = TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{msg}", " ".repeat(pad)));
}

pub fn no_results() {
    centerln(&"no hosts in inventory".red().bold().to_string());
}
