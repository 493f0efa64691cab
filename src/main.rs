use floorcoil::{init_logging, run_job, write_outcome, BUILD_DATE, VERSION};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

struct Args {
    job: PathBuf,
    output: Option<PathBuf>,
}

fn print_usage(program: &str) {
    eprintln!("floorcoil {} (built {})", VERSION, BUILD_DATE);
    eprintln!();
    eprintln!("Usage: {} <job.json|job.toml> [--output <out.json>]", program);
    eprintln!();
    eprintln!("Routes the job and prints the coil as JSON, or writes it to --output.");
    eprintln!("Set RUST_LOG=debug to trace every step.");
}

fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut job = None;
    let mut output = None;
    let mut rest = args.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-o" | "--output" => {
                let path = rest.next().ok_or("--output needs a path")?;
                output = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option {}", flag)),
            path if job.is_none() => job = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {}", extra)),
        }
    }
    match job {
        Some(job) => Ok(Some(Args { job, output })),
        None => Err("missing job file".to_string()),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("floorcoil");

    let args = match parse_args(argv.get(1..).unwrap_or_default()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage(program);
            return Ok(ExitCode::SUCCESS);
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            print_usage(program);
            return Ok(ExitCode::from(2));
        }
    };

    init_logging()?;

    let outcome = run_job(&args.job)?;
    match &args.output {
        Some(path) => write_outcome(&outcome, path)?,
        None => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(if outcome.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
