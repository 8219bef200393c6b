#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        truthiness in bool is OK
        "zero is true"
        "empty is true"
        "nil is false"
        "false is false"
    }

    tests! {
        not in bool is OK
        "false"
        "true"
        "true"
        "false"
        "false"
    }
}
