use std::fmt;

use dbc::{catch_violation, ensures, keeps_invariant, requires, ContractKind};

#[requires(b != 0, a)]
#[ensures(ret * b <= a, ret)]
fn divide(a: u32, b: u32) -> u32 {
    a / b
}

#[requires(!text.is_empty())]
#[ensures(ret.as_ref().map_or(true, |n| *n < 1000))]
fn parse_small(text: &str) -> Result<u32, std::num::ParseIntError> {
    let n = text.parse::<u32>()?;
    if n >= 1000 {
        return Ok(999);
    }
    Ok(n)
}

#[dbc::ensures(ret.len() == n)]
fn zeros(n: usize) -> Vec<u8> {
    vec![0; n]
}

#[ensures(ret.len() <= 1, "bug")]
fn broken(items: &[u8]) -> &[u8] {
    items
}

#[requires(!values.is_empty())]
#[ensures(*ret >= 1, "slots start at one")]
fn first_mut(values: &mut Vec<u8>) -> &mut u8 {
    &mut values[0]
}

struct Gauge {
    value: u8,
}

impl dbc::Invariant for Gauge {
    fn invariant(&self) -> bool {
        self.value < 200
    }
}

impl fmt::Display for Gauge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "gauge at {}", self.value)
    }
}

impl Gauge {
    #[ensures(*ret < 200)]
    fn value_mut(&mut self) -> &mut u8 {
        &mut self.value
    }

    #[keeps_invariant]
    #[ensures(ret == self.value)]
    fn add(&mut self, amount: u8) -> u8 {
        let gauge = &mut *self;
        gauge.value += amount;
        self.value
    }
}

struct Account {
    balance: i64,
}

impl dbc::Invariant for Account {
    fn invariant(&self) -> bool {
        self.balance >= 0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "balance {}", self.balance)
    }
}

impl Account {
    #[keeps_invariant]
    #[requires(amount > 0, amount)]
    fn withdraw(&mut self, amount: i64) {
        self.balance -= amount;
    }

    #[keeps_invariant(no_doc)]
    fn balance(&self) -> i64 {
        self.balance
    }

    #[keeps_invariant("closing")]
    fn close(self) -> i64 {
        self.balance
    }
}

fn main() {
    assert_eq!(divide(7, 2), 3);
    let violation = catch_violation(|| divide(1, 0)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Require);
    assert_eq!(violation.info(), Some("[1]"));
    assert!(violation.call_site().function().ends_with("divide"));

    assert_eq!(parse_small("42"), Ok(42));
    assert_eq!(parse_small("5000"), Ok(999));
    assert!(parse_small("x").is_err());
    assert!(catch_violation(|| parse_small("")).is_err());

    assert_eq!(zeros(3), vec![0, 0, 0]);

    assert_eq!(broken(&[1]), &[1]);
    let violation = catch_violation(|| {
        broken(&[1, 2]);
    })
    .unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Ensure);
    assert_eq!(violation.info(), Some(r#"["bug"]"#));

    let mut values = vec![3, 4];
    *first_mut(&mut values) += 1;
    assert_eq!(values, vec![4, 4]);
    let violation = catch_violation(|| {
        first_mut(&mut vec![0]);
    })
    .unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Ensure);
    assert_eq!(violation.info(), Some(r#"["slots start at one"]"#));

    let mut gauge = Gauge { value: 10 };
    *gauge.value_mut() += 5;
    assert_eq!(gauge.value, 15);
    assert_eq!(gauge.add(5), 20);

    gauge.value = 250;
    let violation = catch_violation(|| {
        gauge.value_mut();
    })
    .unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Ensure);

    gauge.value = 190;
    let violation = catch_violation(|| gauge.add(20)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Invariant);
    assert!(violation.to_string().contains("gauge at 210"));

    let mut account = Account { balance: 10 };
    account.withdraw(4);
    assert_eq!(account.balance(), 6);

    let violation = catch_violation(|| account.withdraw(0)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Require);
    assert_eq!(violation.info(), Some("[0]"));

    let violation = catch_violation(|| account.withdraw(7)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Invariant);
    assert!(violation.to_string().contains("balance -1"));

    let violation = catch_violation(move || account.close()).unwrap_err();
    assert_eq!(violation.info(), Some(r#"["closing", balance -1]"#));

    assert_eq!(Account { balance: 3 }.close(), 3);
}
