//! CLI tool for preflight-validating print-order uploads.
//!
//! This binary demonstrates the capabilities of the printpreflight crate:
//! it checks a PDF, JPEG, or PNG file against an order configuration given
//! on the command line and prints the verdict.

use printpreflight::{
    Duplex, FormatType, OrderConfig, PaperFormat, Preflight, Upload,
};
use std::{env, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let file_path = &args[1];
    let order = match parse_order(&args[2..]) {
        Ok(order) => order,
        Err(msg) => {
            eprintln!("❌ {}", msg);
            process::exit(2);
        }
    };

    let mut upload = match Upload::from_path(file_path) {
        Ok(upload) => upload,
        Err(e) => {
            eprintln!("❌ Cannot open '{}': {}", file_path, e);
            process::exit(1);
        }
    };

    println!("🔍 Validating: {}", file_path);
    println!("{}", "─".repeat(60));

    let verdict = Preflight::new().validate(&mut upload, &order);

    println!(
        "📄 {} — {} bytes, {}",
        verdict.file_info.name, verdict.file_info.size, verdict.file_info.content_type
    );

    for warning in &verdict.warnings {
        println!("⚠️  {}", warning);
    }
    for error in &verdict.errors {
        println!("❌ {}", error);
    }

    println!("{}", "─".repeat(60));
    if verdict.is_valid {
        println!("✅ File accepted");
    } else {
        println!("🚨 File rejected");
        process::exit(1);
    }
}

fn print_usage(program_name: &str) {
    println!("📄 printpreflight - Print-Order Upload Validation Tool");
    println!();
    println!("USAGE:");
    println!("    {} <file> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <file>              PDF, JPEG, or PNG file to validate");
    println!();
    println!("OPTIONS:");
    println!("    --format <A3|A4|A5>   Expected standard paper size");
    println!("    --custom <WxH>        Expected custom size in centimetres (e.g. 21x29.7)");
    println!("    --book <pages>        Treat as a book order with this page count");
    println!("    --duplex              Double-sided order");
    println!("    -h, --help            Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {} flyer.pdf --format A4", program_name);
    println!("    {} poster.jpg --custom 29.7x42", program_name);
    println!("    {} novel.pdf --book 240 --duplex", program_name);
}

fn parse_order(args: &[String]) -> Result<OrderConfig, String> {
    let mut order = OrderConfig::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" => {
                let key = iter.next().ok_or("--format requires a value")?;
                order.format_type = FormatType::Small;
                order.small_format = Some(
                    PaperFormat::from_key(key)
                        .ok_or_else(|| format!("unknown format '{}' (use A3, A4, or A5)", key))?,
                );
            }
            "--custom" => {
                let value = iter.next().ok_or("--custom requires a value")?;
                let (w, h) = value
                    .split_once('x')
                    .ok_or_else(|| format!("invalid size '{}' (expected WxH)", value))?;
                order.format_type = FormatType::Large;
                order.custom_width_cm =
                    Some(w.parse().map_err(|_| format!("invalid width '{}'", w))?);
                order.custom_height_cm =
                    Some(h.parse().map_err(|_| format!("invalid height '{}'", h))?);
            }
            "--book" => {
                let pages = iter.next().ok_or("--book requires a page count")?;
                order.is_book = true;
                order.book_pages =
                    Some(pages.parse().map_err(|_| format!("invalid page count '{}'", pages))?);
            }
            "--duplex" => order.duplex = Duplex::DoubleSided,
            other => return Err(format!("unknown option '{}'", other)),
        }
    }

    Ok(order)
}
