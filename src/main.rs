extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs;
use std::path::Path;

use dasm::assembler;
use dasm::assembler::ast::Program;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tShow listing: {}\n\tOutfile: {}\n\tInfile: {}",
        level_for(args.occurrences_of("verbose")),
        args.is_present("print-debug"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    // clap enforces the presence of INPUT.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());

    let src = match fs::read_to_string(ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(src) => src,
    };

    let program = match assembler::parse(&src) {
        Err(err) => {
            error!("fatal: {}:{}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(program) => program,
    };
    info!("parsed {} statement(s) from `{}`", program.len(), ipath.display());

    if args.is_present("print-debug") {
        println!("{}", listing(&program));
    }

    if let Some(filename) = args.value_of("output") {
        let opath = Path::new(filename);
        if let Err(err) = fs::write(opath, program.to_string()) {
            error!("fatal: unable to write output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        }
        info!("wrote canonical source to `{}`", opath.display());
    }
}

/// One row per statement: index, shape, canonical text and data size.
fn listing(program: &Program) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, statement) in program.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(statement.kind()));
        grid.add(Cell::from(format!("{}", statement)));
        grid.add(Cell::from(match statement.data_word_len() {
            Some(words) => format!("{} word(s)", words),
            None => "-".to_string(),
        }));
    }

    grid.fit_into_columns(4).to_string()
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("writes the canonical form of the parsed source to an outfile"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .alias("s")
            .takes_value(false)
            .help("prints a listing of the parsed statements to STDOUT"))
        .get_matches()
}

fn level_for(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_for(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}
