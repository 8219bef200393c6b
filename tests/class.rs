#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        print_class_and_instance in class is OK
        "Point"
        "Point instance"
        "Point instance"
    }

    tests! {
        methods in class is OK
        "hi"
    }
}
