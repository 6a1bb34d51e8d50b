extern crate chrono;
extern crate docopt;
extern crate env_logger;
extern crate failure;
extern crate libc;
#[macro_use]
extern crate log;
extern crate serde_json;
extern crate timeblocks;

use chrono::Duration;
use docopt::{ArgvMap, Docopt};

use std::io;
use std::io::BufReader;
use std::process;

use timeblocks::block::{TimeBlock, User};
use timeblocks::config::Config;
use timeblocks::context::ViewContext;
use timeblocks::datetime::{current_local_date, next_local_date, transport_date};
use timeblocks::form::{NewBlockForm, NewUserForm};
use timeblocks::input::read_document;
use timeblocks::reports::{place_blocks, DayReport, Report};
use timeblocks::timeline::OvernightPolicy;
use timeblocks::users::{filter_users, UserField};
use timeblocks::util::format_hms;

const USAGE: &'static str = "
timeblocks - day timeline and form tooling for the time block dashboard API.

Without a command, timeblocks reads a block listing (a JSON array, or the API's
{ \"data\": [...] } envelope, optionally preceded by `key: value` header lines
and an empty line) from stdin, prints where each block of the selected day sits
on the 24 hour timeline and renders the day as a PDF.

Usage:
  timeblocks [--date=<date>] [--output=<file>] [--reject-overnight]
  timeblocks new <date> <start> <end> <user> [--style=<style>]
  timeblocks user <name> <email> <phone> [<address>]
  timeblocks users <filter> [--field=<field>...]
  timeblocks date [--next]
  timeblocks (-h | --help)
  timeblocks --version

Options:
  --date=<date>         Day to show, YYYY-MM-DD (today by default).
  --output=<file>       Where to write the PDF (timeline.pdf by default).
  --reject-overnight    Skip blocks running past the end of their day instead of clipping them.
  --style=<style>       Block style tag [default: trabajo].
  --field=<field>       User field to search: name, phoneNumber, email or address.
  --next                Print tomorrow instead of today.
  -h --help             Shows this screen.
  --version             Prints the version of your timeblocks.
";

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

fn main() {
    env_logger::init();

    let args = Docopt::new(USAGE)
        .and_then(|dopt| dopt.parse())
        .unwrap_or_else(|e| e.exit());

    if args.get_bool("--version") {
        println!("{}", VERSION.unwrap_or("unknown"));
        process::exit(libc::EXIT_SUCCESS);
    }

    let result = if args.get_bool("new") {
        new_block(&args)
    } else if args.get_bool("user") {
        new_user(&args)
    } else if args.get_bool("users") {
        search_users(&args)
    } else if args.get_bool("date") {
        print_date(&args)
    } else {
        timeline(&args)
    };

    if let Err(e) = result {
        eprintln!("timeblocks: {}", e);
        process::exit(libc::EXIT_FAILURE);
    }
}

fn timeline(args: &ArgvMap) -> Result<(), failure::Error> {
    let (header, blocks): (_, Vec<TimeBlock>) = read_document(BufReader::new(io::stdin()))?;
    debug!("Read {} block(s) from stdin", blocks.len());

    let mut config = Config::from_header(&header)?;
    if !args.get_str("--date").is_empty() {
        config.date = Some(args.get_str("--date").to_owned());
    }
    if !args.get_str("--output").is_empty() {
        config.report_filename = args.get_str("--output").to_owned();
    }
    if args.get_bool("--reject-overnight") {
        config.overnight = OvernightPolicy::Reject;
    }

    let mut context = ViewContext::new();
    context.subscribe(|change| debug!("View context changed: {:?}", change));
    match config.date {
        Some(ref date) => context.set_date(date)?,
        None => info!("No date selected, using today ({})", context.date()),
    }

    let selected: Vec<TimeBlock> = blocks
        .into_iter()
        .filter(|block| match transport_date(&block.start_time) {
            Ok(day) => day == context.date(),
            Err(e) => {
                warn!("Ignoring block {:?}: {}", block.id, e);
                false
            }
        })
        .collect();
    context.set_blocks(selected);

    println!("Timeline for {}", context.date());

    let (placed, rejected) = place_blocks(context.blocks(), config.overnight);
    for placement in &placed {
        let interval = &placement.interval;
        println!(
            "{:>8} {:>8}  {:6.2}% - {:6.2}%  ({:5.2}%){}  {} [{}]",
            placement.block.start_time.split('T').nth(1).unwrap_or(""),
            placement.block.end_time.split('T').nth(1).unwrap_or(""),
            interval.start_percent,
            interval.end_percent,
            interval.height_percent,
            if interval.clipped { " clipped" } else { "" },
            placement.block.user_label(),
            placement.block.style
        );
    }
    for &(block, ref e) in &rejected {
        println!("skipped {:?}: {}", block.id, e);
    }

    let total = placed
        .iter()
        .filter_map(|p| p.block.duration().ok())
        .fold(Duration::zero(), |acc, d| acc + d);
    println!("Total time booked: {}", format_hms(&total));

    let doc = DayReport.render(context.date(), &placed, &config.report_filename)?;
    doc.finish()?;
    info!("Wrote {}", config.report_filename);

    Ok(())
}

fn new_block(args: &ArgvMap) -> Result<(), failure::Error> {
    let form = NewBlockForm::new(
        args.get_str("<date>"),
        args.get_str("<start>"),
        args.get_str("<end>"),
        args.get_str("<user>"),
    ).with_style(args.get_str("--style"));

    let payload = form.submit()?;
    trace!("New block payload: {:?}", payload);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn new_user(args: &ArgvMap) -> Result<(), failure::Error> {
    let form = NewUserForm::new(
        args.get_str("<name>"),
        args.get_str("<phone>"),
        args.get_str("<email>"),
        args.get_str("<address>"),
    );

    let payload = form.submit()?;
    trace!("New user payload: {:?}", payload);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn search_users(args: &ArgvMap) -> Result<(), failure::Error> {
    let fields = args
        .get_vec("--field")
        .iter()
        .map(|field| field.parse::<UserField>())
        .collect::<Result<Vec<_>, _>>()?;

    let (_, users): (_, Vec<User>) = read_document(BufReader::new(io::stdin()))?;
    let matching = filter_users(&users, args.get_str("<filter>"), &fields);
    debug!("{} of {} user(s) match", matching.len(), users.len());

    println!("{}", serde_json::to_string_pretty(&matching)?);
    Ok(())
}

fn print_date(args: &ArgvMap) -> Result<(), failure::Error> {
    if args.get_bool("--next") {
        println!("{}", next_local_date());
    } else {
        println!("{}", current_local_date());
    }
    Ok(())
}
