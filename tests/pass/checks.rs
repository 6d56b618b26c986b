use dbc::{catch_violation, ContractKind};

fn divide(a: i32, b: i32) -> i32 {
    dbc::require!(b != 0, "division by zero", a);
    let quotient = a / b;
    dbc::ensure!(quotient * b + a % b == a);
    quotient
}

fn checked_sum(values: &[u32]) -> u32 {
    let mut sum = 0u32;
    for value in values {
        dbc::check!(sum.checked_add(*value).is_some(), sum, value);
        sum += value;
    }
    sum
}

fn main() {
    assert_eq!(divide(9, 2), 4);
    assert_eq!(checked_sum(&[1, 2, 3]), 6);

    let violation = catch_violation(|| divide(1, 0)).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Require);
    assert!(violation.call_site().function().ends_with("divide"));
    assert_eq!(violation.info(), Some(r#"["division by zero", 1]"#));

    let message = violation.to_string();
    assert!(message.starts_with("REQUIRE:\n\t\tfunc ("));
    assert!(message.contains(&format!("\n\t\tFile {}:4", file!())));
    assert!(message.ends_with("\n\t\tInfo: [\"division by zero\", 1]"));

    let violation = catch_violation(|| checked_sum(&[u32::MAX, 1])).unwrap_err();
    assert_eq!(violation.kind(), ContractKind::Check);
    assert_eq!(violation.info(), Some(&*format!("[{}, 1]", u32::MAX)));

    let tokens = [
        (catch_violation(|| dbc::require(false, &[])), "REQUIRE"),
        (catch_violation(|| dbc::ensure(false, &[])), "ENSURE"),
        (catch_violation(|| dbc::check(false, &[])), "CHECK"),
    ];
    for (result, token) in tokens.iter() {
        let violation = result.as_ref().unwrap_err();
        assert_eq!(violation.kind().as_str(), *token);
        assert!(violation.to_string().starts_with(token));
    }
}
