use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("kereta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search train schedules and extract them as JSON")
        .arg(clap::arg!([FROM] "Origin station code (e.g. PSE)"))
        .arg(clap::arg!([TO] "Destination station code (e.g. YK)"))
        .arg(clap::arg!([DATE] "Departure date as YYYY-MM-DD"))
        .arg(clap::arg!(-i --input <FILE> "Extract from a saved results page (file path or '-' for stdin)"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, text)")
                .value_name("FORMAT")
                .default_value("json")
                .value_parser(["json", "text"]),
        )
        .arg(clap::arg!(--pretty "Pretty print JSON output"))
        .arg(clap::arg!(--include_query "Include the search query alongside the trains"))
        .arg(clap::arg!(--print_url "Print the search URL and exit without fetching"))
        .arg(
            clap::arg!(--schema <FILE> "Extraction schema file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--base_url <URL> "Base URL of the booking search page").default_value("https://booking.kai.id/"))
        .arg(
            clap::arg!(--allow_domain <HOST> "Host the fetcher may contact; repeat for several")
                .action(clap::ArgAction::Append),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "kereta", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "kereta", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "kereta", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "kereta", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
