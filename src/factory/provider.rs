use crate::error::StoreError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const LOREM_WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium", "doloremque",
    "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis", "et", "quasi",
    "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo", "aspernatur", "odit", "fugit",
    "sed", "quia", "consequuntur", "magni", "dolores", "eos", "qui", "ratione", "sequi", "nesciunt",
    "neque", "dolorem", "ipsum", "dolor", "amet", "consectetur", "adipisci", "velit", "numquam",
    "eius", "modi", "tempora", "incidunt", "ut", "labore", "dolore", "magnam", "aliquam", "quaerat",
    "enim", "ad", "minima", "veniam", "quis", "nostrum", "exercitationem", "ullam", "corporis",
    "nemo", "ipsam", "voluptas", "suscipit", "laboriosam", "nisi", "aliquid", "ex", "ea", "commodi",
    "autem", "vel", "eum", "iure", "reprehenderit", "in", "voluptate", "esse", "quam", "nihil",
    "molestiae", "iusto", "odio", "dignissimos", "ducimus", "blanditiis", "praesentium", "laudantium",
    "totam", "rem", "voluptatum", "deleniti", "atque", "corrupti", "quos", "quas", "molestias",
    "excepturi", "sint", "occaecati", "cupiditate", "non", "provident", "similique", "culpa",
    "officia", "deserunt", "mollitia", "animi", "id", "est", "laborum", "harum", "quidem", "rerum",
    "facilis", "expedita", "distinctio", "nam", "libero", "tempore", "cum", "soluta", "nobis",
    "eligendi", "optio", "cumque", "impedit", "quo", "porro", "quisquam", "minus", "maxime",
    "placeat", "facere", "possimus", "omnis", "assumenda", "repellendus", "temporibus", "quibusdam",
    "illum", "fugiat", "nulla", "pariatur", "at", "vero", "accusamus", "officiis", "debitis",
    "necessitatibus", "saepe", "eveniet", "voluptates", "repudiandae", "recusandae", "itaque",
    "earum", "hic", "tenetur", "a", "sapiente", "delectus", "reiciendis", "voluptatibus", "maiores",
    "doloribus", "asperiores", "repellat",
];

/// Source of random attribute values for fixtures.
pub trait FakeProvider {
    fn word(&mut self) -> Result<String, StoreError>;

    /// A `#rrggbb` color whose three channels each repeat one hex digit.
    fn safe_hex_color(&mut self) -> Result<String, StoreError>;
}

pub struct RandProvider<R: Rng = StdRng> {
    rng: R,
    words: Vec<String>,
}

impl RandProvider<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandProvider<R> {
    pub fn new(rng: R) -> Self {
        Self::with_words(rng, LOREM_WORDS.iter().map(|w| w.to_string()).collect())
    }

    pub fn with_words(rng: R, words: Vec<String>) -> Self {
        Self { rng, words }
    }
}

impl<R: Rng> FakeProvider for RandProvider<R> {
    fn word(&mut self) -> Result<String, StoreError> {
        self.words
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| StoreError::ProviderUnavailable("word list is empty".to_string()))
    }

    fn safe_hex_color(&mut self) -> Result<String, StoreError> {
        let digits = format!("{:03x}", self.rng.gen_range(0..=255u32));
        let mut color = String::with_capacity(7);
        color.push('#');
        for digit in digits.chars() {
            color.push(digit);
            color.push(digit);
        }
        Ok(color)
    }
}
