//! Function deploy/test handlers (placeholders).

pub fn deploy() {
    println!("Deploying function...");
}

pub fn test() {
    println!("Testing function...");
}
