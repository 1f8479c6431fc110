#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr => $($expected:expr)*) => {
        #[test]
        fn $name() {
            use lox::Lox;

            let mut expected = vec![$($expected),*];

            let expected = match expected.len() {
                0 => "".to_string(),
                _ => {
                    expected.push("");
                    expected.join("\n")
                },
            };

            let mut output = Vec::new();
            let mut lox = Lox::new(&mut output);

            lox.run_str($source);

            // drop to release the borrow on `output` before reading it
            drop(lox);
            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($name:ident is ERR $source:expr => $($expected:expr)+) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let expected = vec![$($expected),+].join("\n");
            let path = std::env::temp_dir().join(format!("lox_test_{}.lox", stringify!($name)));
            std::fs::write(&path, $source).expect("write test source to temp file");

            Command::cargo_bin("lox").unwrap()
                .arg(&path)
                .assert()
                .stderr(format!("{expected}\n"))
                .failure();

            let _ = std::fs::remove_file(&path);
        }
    };
}
