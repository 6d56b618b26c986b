use std::fmt;

use dbc::{catch_violation, ContractKind, Invariant};

struct Date {
    day: u8,
    month: u8,
}

impl Date {
    fn set(&mut self, day: u8, month: u8) {
        self.day = day;
        self.month = month;
    }
}

impl Invariant for Date {
    fn invariant(&self) -> bool {
        (1..=31).contains(&self.day) && (1..=12).contains(&self.month)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Day:{} Month:{}", self.day, self.month)
    }
}

/// Only knows whether it is consistent.
struct Stack {
    items: Vec<u8>,
    len: usize,
}

impl Invariant for Stack {
    fn invariant(&self) -> bool {
        self.items.len() == self.len
    }
}

fn main() {
    let mut date = Date { day: 0, month: 0 };

    let violation = catch_violation(|| dbc::invariant!(date)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Invariant);
    assert!(violation.to_string().contains("Day:0 Month:0"));

    let violation = catch_violation(|| dbc::invariant(&date, &[&"after load"])).unwrap_err();
    assert_eq!(violation.info(), Some(r#"["after load", Day:0 Month:0]"#));

    date.set(15, 6);
    dbc::invariant!(date);
    dbc::invariant(&date, &[]);

    let stack = Stack {
        items: vec![1, 2],
        len: 3,
    };
    let violation = catch_violation(|| dbc::invariant_simple!(stack)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Invariant);
    assert_eq!(violation.info(), None);

    let violation = catch_violation(|| dbc::invariant_simple(&stack, &[&stack.len])).unwrap_err();
    assert_eq!(violation.info(), Some("[3]"));
}
