//! Basic plain encoding and decoding.
//!
//! Run with: cargo run --example simple

use plainkv::{from_str, plain_record, to_string};
use std::error::Error;

#[derive(Debug, Default, PartialEq)]
struct Address {
    city: String,
    zip: String,
}

plain_record!(Address { city => "city", zip => "zip" });

#[derive(Debug, Default, PartialEq)]
struct User {
    id: u32,
    name: String,
    email: String,
    roles: Vec<String>,
    address: Address,
    password: String,
}

plain_record!(User {
    id => "id",
    name => "name",
    email => "email",
    roles => "roles",
    address => "address",
    password => "-",
});

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["admin".to_string(), "ops".to_string()],
            address: Address {
                city: "Lisbon".to_string(),
                zip: "1100-148".to_string(),
            },
            password: String::new(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            roles: vec![],
            address: Address {
                city: "Porto".to_string(),
                zip: "4000-322".to_string(),
            },
            password: String::new(),
        },
    ];

    // One block per user, separated by a blank line
    let text = to_string(&users)?;
    println!("Plain output:\n{}\n", text);

    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    // Unknown keys and comment-like lines are skipped
    let edited = "# exported by hand\nID: 7\nname: Carol\nnickname: cc\naddress.city: Faro";
    let carol: User = from_str(edited)?;
    println!("\nTolerant decode: {:?}", carol);

    Ok(())
}
