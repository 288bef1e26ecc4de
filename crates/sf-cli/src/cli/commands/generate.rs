//! Generate command handlers (placeholders).

pub fn analytics_template() {
    println!("Created analytics template.");
}
