//! HTML fragments returned by the pet directory endpoints.
//!
//! Interpolated text goes through [`escape`], which rewrites only `&`, `<`
//! and `>`. Values containing those characters therefore differ from the
//! raw text (`O'Toole & Co` renders as `O'Toole &amp; Co`); everything else,
//! quotes included, is emitted unchanged.

use std::fmt::Write;

use crate::models::Pet;

pub const WELCOME: &str = "<h1>Welcome to the pet directory!</h1>";

pub fn welcome() -> String {
    WELCOME.to_string()
}

/// `<p>{name} {species}</p>`
pub fn pet_detail(pet: &Pet) -> String {
    format!("<p>{} {}</p>", escape(&pet.name), escape(&pet.species))
}

/// `<p>Pet {id} not found</p>`; `id` is the decimal text of the requested id
pub fn pet_not_found(id: &str) -> String {
    format!("<p>Pet {} not found</p>", id)
}

/// A heading with the match count followed by one paragraph per pet name.
pub fn species_listing(species: &str, pets: &[Pet]) -> String {
    let mut body = format!("<h2>There are {} {}s</h2>", pets.len(), escape(species));
    for pet in pets {
        // Writing into a String cannot fail
        let _ = write!(body, "<p>{}</p>", escape(&pet.name));
    }
    body
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
