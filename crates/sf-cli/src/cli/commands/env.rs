//! Env command handlers. Placeholders until remote environments are wired up.

pub fn log_list() {
    println!("Listing env logs...");
}

pub fn var_list() {
    println!("Listing env vars...");
}

pub fn var_unset() {
    println!("Unsetting env var...");
}
