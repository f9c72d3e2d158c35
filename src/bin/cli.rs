#![cfg(not(tarpaulin_include))]

use lazy_static::lazy_static;
use log::warn;
use optirx::options::{OptionKind, option_labels};
use optirx::{
    AdditionCategory, Config, ContactsPowerForm, Edit, Eye, Field, PrescriptionStore,
    load_or_default, save_store,
};
use regex::Regex;
use std::io::{self, Write};
use std::time::Instant;
use uuid::Uuid;

lazy_static! {
    static ref EDIT_REGEX: Regex =
        Regex::new(r"^(?i)(R|L)\.([a-z]+)\s*=\s*(.*)$").unwrap();
}

/// Form being edited, plus the record it was opened from.
struct Session {
    form: ContactsPowerForm,
    editing: Option<Uuid>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    config.init_logging();

    let mut store = load_or_default(&config.store_path)?;
    let mut session = Session {
        form: ContactsPowerForm::new(),
        editing: None,
    };

    let mut start_time = Instant::now();
    let mut status = String::from("ok");
    let mut show = true;
    loop {
        if show {
            display_form(&session);
        }

        print!("[{:.1}] ({}) > ", start_time.elapsed().as_secs_f64(), status);
        io::stdout().flush()?;

        let mut command = String::new();
        if io::stdin().read_line(&mut command)? == 0 {
            break;
        }
        let command = command.trim();
        start_time = Instant::now();

        if command.is_empty() {
            status = String::from("invalid command");
            continue;
        }

        let (word, rest) = match command.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (command, ""),
        };

        status = match word {
            "q" => break,
            "help" => {
                print_help();
                String::from("ok")
            }
            "show" => {
                show = true;
                String::from("ok")
            }
            "hide" => {
                show = false;
                String::from("ok")
            }
            "json" => {
                println!("{}", serde_json::to_string_pretty(&session.form)?);
                String::from("ok")
            }
            "new" => {
                session.form = ContactsPowerForm::new();
                session.editing = None;
                String::from("ok")
            }
            "list" => {
                list_records(&store);
                String::from("ok")
            }
            "options" => match OptionKind::from_name(rest) {
                Some(kind) => {
                    println!("{}", option_labels(kind).join(" "));
                    String::from("ok")
                }
                None => String::from("unknown option list"),
            },
            "submit" => submit(&mut store, &mut session, rest, &config),
            "edit" => match store.find(rest) {
                Some(record) => {
                    session.form = record.to_form();
                    session.editing = Some(record.id);
                    String::from("ok")
                }
                None => String::from("no such prescription"),
            },
            "delete" => match store.find(rest).map(|r| r.id) {
                Some(id) => {
                    store.delete(id)?;
                    if session.editing == Some(id) {
                        session.editing = None;
                    }
                    persist(&store, &config)
                }
                None => String::from("no such prescription"),
            },
            _ => apply_edit(&mut session, command),
        };
    }

    Ok(())
}

fn apply_edit(session: &mut Session, command: &str) -> String {
    let Some(caps) = EDIT_REGEX.captures(command) else {
        return String::from("invalid command");
    };
    let (Some(eye), Some(field)) = (Eye::from_code(&caps[1]), Field::from_code(&caps[2])) else {
        return String::from("invalid field");
    };
    let value = caps[3].trim().to_string();

    let edit = match field {
        Field::DistanceSph => Edit::DistanceSph(value),
        Field::DistanceCyl => Edit::DistanceCyl(value),
        Field::DistanceAxis => Edit::DistanceAxis(value),
        Field::NearSph => Edit::NearSph(value),
        Field::NearCyl => Edit::NearCyl(value),
        Field::NearAxis => Edit::NearAxis(value),
        Field::DistanceAdd => match AdditionCategory::parse_selection(&value) {
            Ok(add) => Edit::DistanceAdd(add),
            Err(e) => return e.to_string(),
        },
    };

    session.form = session.form.apply(eye, edit);
    String::from("ok")
}

fn submit(
    store: &mut PrescriptionStore,
    session: &mut Session,
    customer: &str,
    config: &Config,
) -> String {
    if customer.is_empty() {
        return String::from("customer required");
    }
    match store.submit(customer, &session.form, session.editing) {
        Ok(record) => {
            println!("saved {}", record.id);
            session.editing = Some(record.id);
            persist(store, config)
        }
        Err(e) => e.to_string(),
    }
}

fn persist(store: &PrescriptionStore, config: &Config) -> String {
    match save_store(store, &config.store_path) {
        Ok(()) => String::from("ok"),
        Err(e) => {
            warn!("could not save {}: {}", config.store_path.display(), e);
            String::from("save failed")
        }
    }
}

fn display_form(session: &Session) {
    let fields = [
        Field::DistanceSph,
        Field::DistanceCyl,
        Field::DistanceAxis,
        Field::DistanceAdd,
        Field::NearSph,
        Field::NearCyl,
        Field::NearAxis,
    ];

    if let Some(id) = session.editing {
        println!("editing {}", id);
    }
    print!("\t");
    for field in fields {
        print!("{:<8}", field.code());
    }
    println!();
    for (label, eye) in [("R", Eye::Right), ("L", Eye::Left)] {
        print!("{}\t", label);
        let side = session.form.side(eye);
        for field in fields {
            let text = side.field_text(field);
            print!("{:<8}", if text.is_empty() { "-" } else { text.as_str() });
        }
        println!();
    }
}

fn list_records(store: &PrescriptionStore) {
    if store.is_empty() {
        println!("no prescriptions");
        return;
    }
    for record in store.list() {
        println!(
            "{}  {:<20} R {:>6}/{:>6}  L {:>6}/{:>6}  {}",
            record.id,
            record.customer,
            record.right.distance.sph,
            record.right.near.sph,
            record.left.distance.sph,
            record.left.near.sph,
            record.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
}

fn print_help() {
    println!("Commands:");
    println!("  R.<field>=<value>: Set a right-eye field");
    println!("  L.<field>=<value>: Set a left-eye field");
    println!("      fields: dsph dcyl daxis add nsph ncyl naxis");
    println!("  show / hide: Toggle form display");
    println!("  json: Print the form as JSON");
    println!("  new: Start an empty form");
    println!("  submit <customer>: Save the form");
    println!("  list: List saved prescriptions");
    println!("  edit <id>: Open a saved prescription");
    println!("  delete <id>: Remove a saved prescription");
    println!("  options sph|cyl|axis|add: Print a choice list");
    println!("  q: Quit");
}
