use leanutil_ipv4::Ipv4Address;

fn main() {
    for arg in std::env::args().skip(1) {
        let value = arg
            .strip_prefix("0x")
            .map(|hex| u32::from_str_radix(hex, 16))
            .unwrap_or_else(|| arg.parse::<u32>());

        match value {
            Ok(value) => {
                let addr = Ipv4Address::new(value);
                println!("{value:#010x} -> {addr} ({} bytes)", addr.length());
            }
            Err(err) => match arg.parse::<Ipv4Address>() {
                Ok(addr) => println!("{addr} -> {:#010x}", addr.value()),
                Err(_) => eprintln!("{arg}: {err}"),
            },
        }
    }
}
