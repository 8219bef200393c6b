/// Declares an end-to-end test over a script fixture in
/// `tests/scripts/<scope>/<name>.slate`.
///
/// The `OK` arm runs the script in-process against a captured writer and
/// asserts the exact stdout, one literal per expected line. The `ERR` arm
/// drives the compiled `slate` binary so it can assert the exit code (65
/// for compile-stage errors, 70 for runtime errors) along with the exact
/// stderr, one literal per diagnostic line.
#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:ident is OK $($expected:literal)*) => {
        #[test]
        fn $file() {
            use slate_lang::{Outcome, Slate};

            let mut lines: Vec<&str> = vec![$($expected),*];
            let expected = match lines.len() {
                0 => String::new(),
                _ => {
                    // A trailing empty entry makes the join end in a newline.
                    lines.push("");
                    lines.join("\n")
                }
            };

            let mut output = Vec::new();
            let mut slate = Slate::new(&mut output);

            let script = format!(
                "tests/scripts/{}/{}.slate",
                stringify!($scope),
                stringify!($file)
            );
            let outcome = slate.run_file(&script).expect("test fixture is readable");
            assert_eq!(outcome, Outcome::Success);

            // Release the writer before reading what was captured.
            drop(slate);
            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($file:ident in $scope:ident is ERR $code:literal $($expected:literal)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;

            let expected = vec![$($expected),+].join("\n");
            let script = format!(
                "tests/scripts/{}/{}.slate",
                stringify!($scope),
                stringify!($file)
            );

            Command::cargo_bin("slate")
                .unwrap()
                .arg(script)
                .assert()
                .stderr(format!("{expected}\n"))
                .code($code);
        }
    };
}
