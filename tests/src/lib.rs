//! This crate defines the integration tests for the `dbc` crate.
//!
//! These are defined in a different crate, so that the attributes are expanded the way they are
//! in any crate depending on `dbc`, which `proc-macro-crate` needs to work properly.

#[cfg(test)]
mod tests {
    use trybuild::TestCases;

    #[test]
    fn pass() {
        let t = TestCases::new();
        t.pass("pass/*.rs");
    }

    #[test]
    fn compile_fail() {
        let t = TestCases::new();
        t.compile_fail("compile_fail/*.rs");
    }
}
