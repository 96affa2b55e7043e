extern crate spipwm;

mod debug;

use spipwm::{
    script,
    Config,
    Result,
    SpiPwm,
    Testbench
};

use clap::{clap_app, crate_version};
use chrono::Utc;
use log::{info, LevelFilter};

fn main() {
    let app = clap_app!(spipwm =>
        (version: crate_version!())
        (author: "Simon Cooper")
        (about: "Serial-programmed 16 channel output and PWM peripheral model.")
        (@arg SCRIPT: "Command script to run. Without one, commands are read from stdin.")
        (@arg clock: -c --clock +takes_value "System clock in Hz. Defaults to 10000000.")
        (@arg carrier: -f --carrier +takes_value "PWM carrier in Hz. Defaults to 3000.")
        (@arg verbose: -v ... "Log more. Repeat for more detail.")
    );

    let cmd_args = app.get_matches();

    let level = match cmd_args.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = Config::from_args(cmd_args.value_of("clock"), cmd_args.value_of("carrier"))
        .and_then(SpiPwm::new)
        .map(Testbench::attach)
        .and_then(|mut tb| match cmd_args.value_of("SCRIPT") {
            Some(path) => run_script(&mut tb, path),
            None => {
                debug::debug_mode(&mut tb);
                Ok(())
            }
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_script(tb: &mut Testbench, path: &str) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    info!("running {} ({:.1} Hz carrier)", path, tb.config().carrier_actual_hz());

    let start = Utc::now();
    script::run(tb, &text, |text| println!("{}", text))?;
    let elapsed = Utc::now() - start;

    info!("{} cycles in {} ms", tb.handle().cycles(), elapsed.num_milliseconds());
    Ok(())
}
