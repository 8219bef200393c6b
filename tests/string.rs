#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        multiline in string is OK
        "one"
        "two"
    }

    tests! {
        escapes in string is OK
        "say \"hi\""
        "back\\slash"
    }

    tests! {
        unterminated in string is ERR 65
        "[line 1] Error: Unterminated string."
    }
}
