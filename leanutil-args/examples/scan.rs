use leanutil_args::{scan_with, tokens_equal};

#[derive(Debug, Default)]
struct MyArgs<'a> {
    count: i32,
    ratio: f32,
    port: Option<u16>,
    name: &'a str,
}

fn main() {
    let owned: Vec<String> = std::env::args().collect();
    let argv: Vec<&str> = owned.iter().map(String::as_str).collect();

    let mut args = MyArgs::default();

    scan_with(&argv, &mut args, |cursor| {
        let arg = cursor.current();

        if tokens_equal(arg, "-n") {
            let count = cursor.request_next_int(1);
            cursor.state_mut().count = count;
        } else if tokens_equal(arg, "-r") {
            let ratio = cursor.request_next_float(0.5);
            cursor.state_mut().ratio = ratio;
        } else if tokens_equal(arg, "-p") {
            match cursor.require_next::<u16>() {
                Ok(port) => cursor.state_mut().port = Some(port),
                Err(err) => eprintln!("-p: {err}"),
            }
        } else if !cursor.is_first() {
            cursor.state_mut().name = arg;
        }
    });

    println!("{args:?}");
}
