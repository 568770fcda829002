#[test]
fn pmp() {
    trycmd::TestCases::new()
        .case("tests/pmp/*.toml")
        .env("STRPROFILES_ALLOW_STDIN", "true")
        .default_bin_name("strprofiles");
}

#[test]
fn profile() {
    trycmd::TestCases::new()
        .case("tests/profile/*.toml")
        .env("STRPROFILES_ALLOW_STDIN", "true")
        .default_bin_name("strprofiles");
}

#[test]
fn rmp() {
    trycmd::TestCases::new()
        .case("tests/rmp/*.toml")
        .env("STRPROFILES_ALLOW_STDIN", "true")
        .default_bin_name("strprofiles");
}
