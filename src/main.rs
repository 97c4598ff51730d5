//! Shipquote CLI - Command-line interface
//!
//! Commands:
//!   rates     - Quote all eligible methods for a request
//!   quote     - Quote one specific method
//!   validate  - Check a catalog for configuration problems
//!   list      - Show the methods in a catalog
//!   schema    - Print JSON schema for a type

use shipquote::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "rates" => cmd_rates(&args[2..]),
        "quote" => cmd_quote(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        "list" => cmd_list(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("shipquote {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
Shipquote - Shipping rate evaluation

USAGE:
    shipquote <COMMAND> [OPTIONS]

COMMANDS:
    rates <catalog> <request.json>     Quote all eligible methods
    quote <catalog> <request.json>     Quote one method (--method CODE)
    validate <catalog> [--strict]      Check catalog configuration
    list <catalog>                     Show methods, order, active flag
    schema [name]                      Print JSON schema for a type
                                        (method|catalog|request|response)
    version                            Print version

OPTIONS:
    --method <CODE>                    Method code for the quote command
    --json                             JSON output format
    --strict                           Treat validation warnings as errors
    --output <file>                    Output file (default: stdout)

<catalog> is a YAML file or a directory of YAML files.

EXAMPLES:
    shipquote rates methods.yaml request.json
    shipquote quote methods.yaml request.json --method EXPRESS
    shipquote validate config/shipping/ --strict
    shipquote schema request
"#
    );
}

fn cmd_rates(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        return Err("Usage: shipquote rates <catalog> <request.json> [--json]".into());
    }

    let catalog = load_catalog(&args[0])?;
    let request = load_request(&args[1])?;
    let json_output = args.contains(&"--json".to_string());

    let response = calculate_rates(&catalog, &request)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let quotes = &response.data.shipping_rates;
    if quotes.is_empty() {
        println!("No shipping available for this destination/cart.");
        return Ok(());
    }
    for quote in quotes {
        let free = if quote.is_free_shipping { " (free shipping)" } else { "" };
        let eta = quote
            .estimated_delivery
            .as_deref()
            .map(|d| format!(", {}", d))
            .unwrap_or_default();
        println!("{:<12} {:<24} {}{}{}", quote.code, quote.name, quote.cost, free, eta);
    }
    Ok(())
}

fn cmd_quote(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        return Err(
            "Usage: shipquote quote <catalog> <request.json> --method <CODE> [--json]".into(),
        );
    }

    let catalog = load_catalog(&args[0])?;
    let request = load_request(&args[1])?;
    let json_output = args.contains(&"--json".to_string());
    let code = parse_method_arg(args)
        .ok_or_else(|| Error::Other("--method <CODE> is required".into()))?;

    let response = quote_method(&catalog, &code, &request)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let rate = &response.data.rate;
        println!("{} ({}): {}", rate.name, rate.code, rate.cost);
        if rate.is_free_shipping {
            println!("Free shipping applied.");
        }
        println!(
            "  base {} + weight {} ({}g)",
            rate.details.base_cost, rate.details.weight_charge, rate.details.total_weight
        );
    }
    Ok(())
}

fn cmd_validate(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: shipquote validate <catalog> [--strict] [--json]".into());
    }

    let catalog = load_catalog(&args[0])?;
    let strict = args.contains(&"--strict".to_string());
    let json_output = args.contains(&"--json".to_string());

    let report = validate_catalog(&catalog);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_report());
    }

    if report.passed(strict) {
        Ok(())
    } else {
        Err("Validation failed".into())
    }
}

fn cmd_list(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: shipquote list <catalog> [--json]".into());
    }

    let catalog = load_catalog(&args[0])?;
    let json_output = args.contains(&"--json".to_string());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("Catalog {} ({} methods)\n", catalog.hash(), catalog.methods.len());
    let mut methods: Vec<_> = catalog.methods.iter().collect();
    methods.sort_by_key(|m| m.display_order);
    for method in methods {
        let marker = if method.is_active { "✓" } else { "✗" };
        println!(
            "{} {:>4}  {:<12} {:<24} base {}",
            marker, method.display_order, method.code, method.name, method.base_cost
        );
    }
    Ok(())
}

fn cmd_schema(args: &[String]) -> Result<()> {
    let name = args.first().map(String::as_str).unwrap_or("method");
    let output = parse_output_arg(args);

    let schema = match name {
        "method" => schemars::schema_for!(ShippingMethod),
        "catalog" => schemars::schema_for!(MethodCatalog),
        "request" => schemars::schema_for!(CalculateRatesRequest),
        "response" => schemars::schema_for!(ApiResponse<ShippingRates>),
        other => {
            return Err(format!(
                "Unknown schema '{}'. Expected method|catalog|request|response",
                other
            )
            .into())
        }
    };

    let json = serde_json::to_string_pretty(&schema)?;
    write_output(&output, &json)
}

fn load_catalog(path: &str) -> Result<MethodCatalog> {
    MethodCatalog::load(Path::new(path))
}

fn load_request(path: &str) -> Result<CalculateRatesRequest> {
    let content = fs::read_to_string(path).map_err(Error::Io)?;
    serde_json::from_str(&content).map_err(|e| Error::InvalidRequest(e.to_string()))
}

fn parse_method_arg(args: &[String]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--method" || arg == "-m" {
            if let Some(code) = args.get(i + 1) {
                return Some(code.clone());
            }
        }
    }
    None
}

fn parse_output_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--output" || arg == "-o" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

fn write_output(path: &Option<PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(Error::Io)?;
            eprintln!("Written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
