use blazecss_lib::blaze_generate::blaze_inherit;
use blazecss_lib::InheritOptions;
use clap::Parser;
use log::info;
use std::fs;

const BLAZECSS_INTRO: &str = r#"
        ____  __                 ________________
       / __ )/ /___ _____  ___  / ____/ ___/ ___/
      / __  / / __ `/_  / / _ \/ /    \__ \\__ \
     / /_/ / / /_/ / / /_/  __/ /___ ___/ /__/ /
    /_____/_/\__,_/ /___/\___/\____//____/____/

    Welcome to BlazeCSS - inherit/extend resolution for stylesheets!
"#;

#[derive(Parser)]
#[command(name = "BlazeCSS")]
#[command(about = "Resolve inherit/extend declarations in a CSS file")]
struct Args {
    /// Input file name.
    input: String,

    /// Output file name. The result goes to stdout when omitted.
    output: Option<String>,

    /// Regular expression matching the property names treated as directives.
    #[arg(long)]
    property_pattern: Option<String>,
}

fn main() {
    env_logger::init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    let options = match &args.property_pattern {
        Some(pattern) => match InheritOptions::with_property_pattern(pattern) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => InheritOptions::default(),
    };

    let css_content = match fs::read_to_string(&args.input) {
        Ok(css_content) => css_content,
        Err(e) => {
            eprintln!("Error reading CSS file: {}", e);
            std::process::exit(1);
        }
    };
    info!("read {} bytes from {}", css_content.len(), args.input);

    let resolved = match blaze_inherit::generate(&css_content, &options) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(output) => {
            eprintln!("{}", BLAZECSS_INTRO);
            if let Err(e) = fs::write(output, resolved) {
                eprintln!("Error writing CSS file: {}", e);
                std::process::exit(1);
            }
            eprintln!("Successfully wrote {}.", output);
        }
        None => print!("{}", resolved),
    }
}
