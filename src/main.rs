use fsh::flags::Flags;
use fsh::shell::Shell;
use std::env;

fn main() -> Result<(), fsh::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("fsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    fsh::logging::init(&flags)?;

    let mut shell = Shell::new(flags)?;
    shell.run()
}
