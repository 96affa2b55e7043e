// Interactive mode
use spipwm::{
    script::{self, Step},
    Testbench
};

pub fn debug_mode(tb: &mut Testbench) {
    println!("Debug mode.");
    println!("Enter 'h' for help.");
    loop {
        let mut input = String::new();
        match std::io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => match script::parse(&input) {
                Ok(Some(command)) => match script::execute(tb, command) {
                    Step::Continue(Some(text)) => println!("{}", text),
                    Step::Continue(None) => {},
                    Step::Quit => break,
                },
                Ok(None) => {},
                Err(e) => println!("{}", e),
            },
            Err(e) => {
                println!("Input error: {}", e);
                break;
            },
        }
    }
}
