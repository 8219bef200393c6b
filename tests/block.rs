#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        resolution_freezes_at_declaration in block is OK
        "global"
        "global"
    }

    tests! {
        empty_block in block is OK
        "after"
    }

    tests! {
        nested in block is OK
        "3"
    }
}
