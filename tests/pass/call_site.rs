use dbc::catch_violation;

#[track_caller]
fn one_layer(condition: bool) {
    dbc::require(condition, &[]);
}

#[track_caller]
fn two_layers(condition: bool) {
    one_layer(condition);
}

#[track_caller]
fn three_layers(condition: bool) {
    two_layers(condition);
}

fn untracked(condition: bool) {
    dbc::require(condition, &[]);
}

fn main() {
    one_layer(true);
    two_layers(true);
    three_layers(true);

    // Each layer forwards the location of its own caller.
    let line = line!() + 1;
    let violation = catch_violation(|| one_layer(false)).unwrap_err();
    assert_eq!(violation.call_site().line(), line);
    assert_eq!(violation.call_site().file(), file!());

    let line = line!() + 1;
    let violation = catch_violation(|| two_layers(false)).unwrap_err();
    assert_eq!(violation.call_site().line(), line);

    let line = line!() + 1;
    let violation = catch_violation(|| three_layers(false)).unwrap_err();
    assert_eq!(violation.call_site().line(), line);

    // A helper that does not track its caller is the caller of the check.
    let violation = catch_violation(|| untracked(false)).unwrap_err();
    assert_eq!(violation.call_site().line(), 19);
    if violation.call_site().address() != 0 {
        assert!(violation.call_site().function().ends_with("untracked"));
    }

    let line = line!() + 1;
    let violation = catch_violation(|| dbc::check!(false)).unwrap_err();
    assert_eq!(violation.call_site().line(), line);
    assert!(violation.call_site().function().ends_with("main"));
}
