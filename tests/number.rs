#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "987654"
        "0"
        "-0"
        "123.456"
        "-0.001"
    }

    tests! {
        trailing_dot in number is ERR 65
        "[line 1] Error at ';': Expect property name after '.'."
    }

    tests! {
        leading_dot in number is ERR 65
        "[line 1] Error at '.': Expect expression."
    }
}
