#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line_comments in comment is OK
        "one"
        "two"
    }

    tests! {
        only_comment in comment is OK
    }

    tests! {
        comment_preserves_line_numbers in comment is ERR 70
        "[line 2] Runtime error: Undefined variable 'ghost'."
    }
}
