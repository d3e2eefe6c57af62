/*
 * GS1 Barcode Syntax Engine
 *
 * This is a contributed example that shows how a Rust language binding might
 * be developed.
 *
 *
 * @author Copyright (c) 2021-2026 GS1 AISBL.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 *
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use clap::Parser;
use gs1encoders::{GS1Encoder, Validation};
use log::LevelFilter;

/// Validate and convert between GS1 bracketed AI data, unbracketed AI data,
/// and barcode scan data.
#[derive(Parser)]
struct Args {
    /// Bracketed AI data, e.g. "(01)09521234543213(10)ABC123(99)TEST"
    #[arg(long, conflicts_with = "scan_data")]
    ai_data: Option<String>,

    /// Barcode scan data, e.g. "]C1010952123454321310ABC123"
    #[arg(long, conflicts_with = "ai_data")]
    scan_data: Option<String>,

    /// Include AI data titles in the HRI text
    #[arg(long)]
    data_titles: bool,

    /// Permit AIs that are not present in the AI table
    #[arg(long)]
    permit_unknown_ais: bool,

    /// Increase logging verbosity
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    simple_logger::SimpleLogger::new()
        .with_level(if args.verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Warn
        })
        .init()
        .unwrap();

    let mut gs1encoder = GS1Encoder::new().unwrap_or_else(|error| panic!("{}", error));

    println!("\nVersion: {}\n", gs1encoder.get_version());

    gs1encoder.set_permit_unknown_ais(args.permit_unknown_ais);

    println!(
        "RequisiteAis validation enabled: {}",
        gs1encoder.get_validation_enabled(Validation::RequisiteAis)
    );

    let ai_data = args
        .ai_data
        .as_deref()
        .unwrap_or("(01)09521234543213(10)ABC123(99)TEST");

    if let Some(scan_data) = &args.scan_data {
        gs1encoder
            .set_scan_data(scan_data)
            .unwrap_or_else(|error| panic!("{}", error));
        println!("\nSCAN DATA IN: {}", scan_data);
    } else {
        gs1encoder
            .set_ai_data_str(ai_data)
            .unwrap_or_else(|error| panic!("{}", error));
        println!("\nAI IN:  {}", ai_data);
    }

    println!(
        "AI OUT: {}",
        gs1encoder
            .get_ai_data_str()
            .unwrap_or_else(|| "Not AI data".to_string())
    );
    println!("DATA:   {}", gs1encoder.get_data_str());

    gs1encoder.set_include_data_titles_in_hri(args.data_titles);
    println!(
        "\nHRI{}:",
        if gs1encoder.get_include_data_titles_in_hri() {
            " (including data titles)"
        } else {
            ""
        }
    );
    for h in gs1encoder.get_hri() {
        println!("    {}", h);
    }

    match gs1encoder.get_dl_uri(Some("https://example.com")) {
        Ok(uri) => println!("\nDL URI: {}", uri),
        Err(error) => println!("\nDL URI: not available: {}", error),
    }

    match gs1encoder.get_scan_data() {
        Ok(Some(scan_data)) => println!("Scan data: {}", scan_data),
        Ok(None) => println!("Scan data: none (no symbology set)"),
        Err(error) => println!("Scan data: error: {}", error),
    }

    println!("\nAdd check digit: {}", gs1encoder.get_add_check_digit());
    println!("Permit unknown AIs: {}", gs1encoder.get_permit_unknown_ais());
}
