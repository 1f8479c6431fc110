#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals is OK "print \"hello\"; print \"\";" =>
        "hello"
        ""
    }

    tests! {
        concatenation is OK "print \"foo\" + \"bar\";" =>
        "foobar"
    }

    tests! {
        multiline is OK "print \"line one\nline two\";" =>
        "line one\nline two"
    }

    tests! {
        unterminated is ERR "\"never closed" =>
        "[line 1] Error: Unterminated string."
    }

    tests! {
        error_after_multiline is ERR "\"line one\nline two\";\n|" =>
        "[line 3] Error: Unexpected character '|'."
    }
}
