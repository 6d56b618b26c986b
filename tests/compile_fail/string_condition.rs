use dbc::requires;

#[requires("x > 0")]
fn halve(x: u32) -> u32 {
    x / 2
}

fn main() {
    halve(4);
}
