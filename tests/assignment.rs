#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        basic is OK "var a = 1; print a; a = 2; print a;" =>
        "1"
        "2"
    }

    tests! {
        is_right_associative is OK "var a; var b; a = b = 5; print a; print b;" =>
        "5"
        "5"
    }

    tests! {
        invalid_target is ERR "1 = 2;" =>
        "[line 1] Error at '=': Invalid assignment target."
    }

    tests! {
        undefined_target is ERR "a = 1;" =>
        "Undefined variable 'a'."
        "[line 1]"
    }
}
