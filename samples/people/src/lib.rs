//! # People Sample
//!
//! Reads `Person` records from any [`Input`] source by unfolding a lazy
//! [`Stream`], then greets everyone through [`IO`].
//!
//! A record is three entries: an id, a first name and a last name. Reading
//! stops at the first record whose id is negative, missing or malformed.

#![forbid(unsafe_code)]

use std::fmt;

use lazyfp::effect::{IO, Input, ReadResult};
use lazyfp::persistent::PersistentList;
use lazyfp::stream::Stream;
use tracing::{debug, warn};

/// A person read from input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    /// Identifier, as entered.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl fmt::Display for Person {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "#{} {} {}",
            self.id, self.first_name, self.last_name
        )
    }
}

/// Reads one record, prompting for each field when the source is
/// interactive.
///
/// # Errors
///
/// Propagates the reader's [`lazyfp::effect::InputError`].
pub fn read_person<I: Input>(input: I) -> ReadResult<Person, I> {
    let Some((id, input)) = input.read_int_prompt("Enter ID or a negative number to quit:")?
    else {
        return Ok(None);
    };
    let Some((first_name, input)) = input.read_string_prompt("Enter first name:")? else {
        return Ok(None);
    };
    let Some((last_name, input)) = input.read_string_prompt("Enter last name:")? else {
        return Ok(None);
    };
    let person = Person {
        id,
        first_name,
        last_name,
    };
    debug!(%person, "read person");
    Ok(Some((person, input)))
}

/// Reads records until the input ends.
///
/// A read error ends the list like the end of input does; it is logged
/// rather than returned.
pub fn read_people<I: Input + 'static>(input: I) -> PersistentList<Person> {
    Stream::unfold(input, |input| {
        read_person(input)
            .inspect_err(|error| warn!(%error, "stopped reading people"))
            .ok()
            .flatten()
    })
    .to_list()
}

/// The greeting for `person`.
pub fn greeting(person: &Person) -> String {
    format!("Hello, {} {}!", person.first_name, person.last_name)
}

/// One action printing a greeting per person, in order.
pub fn greet_all(people: &PersistentList<Person>) -> IO<()> {
    let people = people.clone();
    IO::new(move || {
        for person in &people {
            println!("{}", greeting(person));
        }
    })
}
