#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod inventory;
