use clap::Parser;
use color_eyre::Result;

use labdat::input::InputSource;
use labdat::{loader, Args, ConsoleInput, DataProcessor, Error, LabelConfig};

fn print_help() {
    println!(
        r#"commands:
  plot         plot selected columns against the time axis
  rundown      statistics table for selected columns
  meta         show the metadata table
  json         metadata as a JSON object
  timestamp    split the acquisition timestamp into date and time
  help
  exit | quit
"#
    );
}

fn print_metadata(processor: &DataProcessor<ConsoleInput>) {
    let mut table = comfy_table::Table::new();
    table.set_header(vec!["Key", "Value"]);
    for (key, value) in processor.metadata().rows() {
        table.add_row(vec![key.clone(), value.clone()]);
    }
    println!("{table}");
}

/// Print an operation failure and keep the session alive; only a closed
/// input stream ends the loop.
fn report<T>(result: Result<T, Error>) -> bool {
    match result {
        Ok(_) => true,
        Err(Error::InputClosed) => false,
        Err(e) => {
            println!("{e}");
            true
        }
    }
}

fn run(mut processor: DataProcessor<ConsoleInput>, args: &Args) -> Result<()> {
    println!("labdat interactive session");
    println!("type 'help' for commands\n");

    loop {
        let line = match processor.input_mut().read_line("labdat> ") {
            Ok(line) => line,
            Err(Error::InputClosed) => break,
            Err(e) => return Err(e.into()),
        };

        let keep_going = match line.trim() {
            "" => true,
            "help" => {
                print_help();
                true
            }
            "plot" => report(processor.visualize_data().map(|saved| {
                if let Some(name) = saved {
                    println!("saved plot as {name}");
                }
            })),
            "rundown" => report(processor.data_rundown()),
            "meta" => {
                print_metadata(&processor);
                true
            }
            "json" => report(processor.metadata_json().map(|json| println!("{json}"))),
            "timestamp" => report(processor.extract_timestamp(&args.timestamp_key)),
            "exit" | "quit" => break,
            _ => {
                println!("unknown command. type 'help'.");
                true
            }
        };

        if !keep_going {
            break;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let args = Args::parse();

    let data = loader::load_dataset(&args.data, !args.no_header, args.delimiter)?;
    let metadata = loader::load_metadata(&args.metadata)?;
    log::info!(
        "loaded {} rows x {} columns, {} metadata keys",
        data.height(),
        data.width(),
        metadata.rows().len()
    );

    let config = LabelConfig {
        label_key: args.label_key.clone(),
        units_key: args.units_key.clone(),
        delimiter: args.label_delimiter.clone(),
        time_label: args.time_label.clone(),
    };
    let input = ConsoleInput::new()?;
    let processor = DataProcessor::new(data, metadata, config, input);

    run(processor, &args)
}
