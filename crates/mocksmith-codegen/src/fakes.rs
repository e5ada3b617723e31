//! Leaf value fabrication.
//!
//! Every faker draws exclusively from the RNG handle it is given, so
//! a seeded generation call replays byte for byte.

use chrono::{DateTime as ChronoDateTime, Utc};
use fake::Fake;
use fake::faker::chrono::en::DateTime;
use fake::faker::company::en::CompanyName;
use fake::faker::currency::en::CurrencyCode;
use fake::faker::internet::en::{DomainSuffix, Username};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::{FirstName, LastName, Name};
use rand::Rng;
use serde_json::{Value, json};

use crate::program::FakeKind;

pub(crate) fn fake_value(kind: FakeKind, rng: &mut impl Rng) -> Value {
    match kind {
        FakeKind::Alpha => {
            let word: String = Word().fake_with_rng(rng);
            Value::String(word)
        }
        FakeKind::Int => json!(rng.random_range(0..=100_000)),
        FakeKind::Bool => Value::Bool(rng.random_bool(0.5)),
        FakeKind::FirstName => fake_string(FirstName(), rng),
        // The fake catalog carries no middle-name faker; a first name
        // is indistinguishable in output.
        FakeKind::MiddleName => fake_string(FirstName(), rng),
        FakeKind::LastName => fake_string(LastName(), rng),
        FakeKind::FullName => fake_string(Name(), rng),
        FakeKind::CompanyName => fake_string(CompanyName(), rng),
        FakeKind::CurrencyCode => fake_string(CurrencyCode(), rng),
        FakeKind::Uuid => Value::String(random_uuid(rng)),
        FakeKind::Url => {
            let host: String = Username().fake_with_rng(rng);
            let suffix: String = DomainSuffix().fake_with_rng(rng);
            let path: String = Word().fake_with_rng(rng);
            Value::String(format!("https://{host}.{suffix}/{path}"))
        }
        FakeKind::Avatar => Value::String(format!(
            "https://avatars.githubusercontent.com/u/{}",
            rng.random_range(0..=100_000_000u64)
        )),
        FakeKind::DateTime => {
            let moment: ChronoDateTime<Utc> = DateTime().fake_with_rng(rng);
            Value::String(moment.to_rfc3339())
        }
    }
}

fn fake_string<F>(faker: F, rng: &mut impl Rng) -> Value
where
    F: Fake,
    String: fake::Dummy<F>,
{
    let value: String = faker.fake_with_rng(rng);
    Value::String(value)
}

fn random_uuid(rng: &mut impl Rng) -> String {
    let bytes: [u8; 16] = rng.random();
    uuid::Uuid::from_bytes(bytes).to_string()
}
