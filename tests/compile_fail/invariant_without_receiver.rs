use dbc::{keeps_invariant, requires};

#[requires(x > 0)]
#[keeps_invariant]
fn halve(x: u32) -> u32 {
    x / 2
}

fn main() {
    halve(4);
}
