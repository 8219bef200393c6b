#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        capture_before_shadow in closure is OK
        "global"
    }

    tests! {
        counter in closure is OK
        "1"
        "2"
        "1"
    }

    tests! {
        close_over_parameter in closure is OK
        "hello world"
    }

    tests! {
        shared_environment in closure is OK
        "42"
    }
}
