use std::collections::HashSet;
use std::hash::Hash;

use log::debug;

use crate::error::MinterError;
use crate::generators::alphanumeric::AlphanumericGenerator;
use crate::generators::traits::ValueGenerator;

/// Issues values that are unique across everything this instance has
/// issued, including any seeded values.
///
/// Not synchronised: callers sharing an instance must serialise access.
pub struct CodeGenerator<G: ValueGenerator = AlphanumericGenerator> {
    generator: G,
    issued: Vec<G::Value>,
    seen: HashSet<G::Value>,
}

impl Default for CodeGenerator<AlphanumericGenerator> {
    fn default() -> Self {
        Self::new(AlphanumericGenerator)
    }
}

impl<G> CodeGenerator<G>
where
    G: ValueGenerator,
    G::Value: Eq + Hash + Clone,
{
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            issued: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Marks `codes` as already consumed. Duplicates are dropped.
    pub fn with_issued(mut self, codes: impl IntoIterator<Item = G::Value>) -> Self {
        for code in codes {
            self.register(code);
        }
        self
    }

    /// Draws from the strategy until it yields an unissued value.
    ///
    /// Never returns if the strategy cannot produce a fresh value.
    pub fn generate(&mut self, args: &G::Args) -> G::Value {
        loop {
            let candidate = self.generator.generate(args);
            if !self.seen.contains(&candidate) {
                self.register(candidate.clone());
                return candidate;
            }
        }
    }

    /// Like [`generate`](Self::generate) but gives up after `max_attempts`
    /// strategy calls. The registry is untouched on failure.
    pub fn try_generate(
        &mut self,
        args: &G::Args,
        max_attempts: u64,
    ) -> Result<G::Value, MinterError> {
        for attempt in 1..=max_attempts {
            let candidate = self.generator.generate(args);
            if !self.seen.contains(&candidate) {
                if attempt > 1 {
                    debug!("Fresh code found after {} attempts", attempt);
                }
                self.register(candidate.clone());
                return Ok(candidate);
            }
        }
        Err(MinterError::Exhausted(max_attempts))
    }

    /// Issued values in issuance order, seeds first.
    pub fn issued(&self) -> &[G::Value] {
        &self.issued
    }

    pub fn contains(&self, value: &G::Value) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.issued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn register(&mut self, value: G::Value) {
        if self.seen.insert(value.clone()) {
            self.issued.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::alphanumeric::DEFAULT_CODE_LENGTH;
    use crate::generators::traits::{from_fn, MockValueGenerator};
    use quickcheck_macros::quickcheck;
    use rand::Rng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CYCLE: [&str; 3] = ["AAA", "BBB", "CCC"];

    fn cycling() -> impl ValueGenerator<Args = (), Value = String> {
        let next = AtomicUsize::new(0);
        from_fn(move |_: &()| {
            let i = next.fetch_add(1, Ordering::SeqCst);
            CYCLE[i % CYCLE.len()].to_string()
        })
    }

    #[quickcheck]
    fn issued_codes_are_pairwise_distinct(count: u8) -> bool {
        let mut codes: CodeGenerator = CodeGenerator::default();
        let out: Vec<String> = (0..count)
            .map(|_| codes.generate(&DEFAULT_CODE_LENGTH))
            .collect();
        let unique: HashSet<&String> = out.iter().collect();
        unique.len() == out.len() && codes.len() == out.len()
    }

    #[test]
    fn small_space_is_drained_without_repeats() {
        let mut codes = CodeGenerator::new(from_fn(|_: &()| rand::rng().random_range(0..50u32)));

        let mut out: Vec<u32> = (0..50).map(|_| codes.generate(&())).collect();
        out.sort_unstable();

        assert_eq!(out, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_value_is_skipped() {
        let mut codes = CodeGenerator::new(cycling()).with_issued(["BBB".to_string()]);

        assert_eq!(codes.generate(&()), "AAA");
        assert_eq!(codes.generate(&()), "CCC");
        assert!(codes.try_generate(&(), 10).is_err());
        assert_eq!(codes.issued(), ["BBB", "AAA", "CCC"]);
    }

    #[test]
    fn duplicate_seeds_are_collapsed() {
        let codes = CodeGenerator::new(cycling())
            .with_issued(["AAA".to_string(), "AAA".to_string(), "BBB".to_string()]);

        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&"AAA".to_string()));
        assert!(!codes.contains(&"CCC".to_string()));
    }

    #[test]
    fn new_generator_is_empty() {
        let codes: CodeGenerator = CodeGenerator::default();
        assert!(codes.is_empty());
        assert!(codes.issued().is_empty());
    }

    #[test]
    fn args_are_forwarded_to_strategy() {
        let mut mock = MockValueGenerator::new();
        mock.expect_generate()
            .withf(|len| *len == 9)
            .times(1)
            .returning(|len| "Z".repeat(*len));

        let mut codes = CodeGenerator::new(mock);
        assert_eq!(codes.generate(&9), "ZZZZZZZZZ");
    }

    #[test]
    fn constant_strategy_issues_once() {
        let mut mock = MockValueGenerator::new();
        mock.expect_generate().returning(|_| "SAME".to_string());

        let mut codes = CodeGenerator::new(mock);
        assert_eq!(codes.generate(&4), "SAME");
        assert!(matches!(codes.try_generate(&4, 25), Err(MinterError::Exhausted(25))));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn try_generate_stops_after_max_attempts() {
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut codes = CodeGenerator::new(from_fn(move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
            7u8
        }))
        .with_issued([7u8]);

        assert!(codes.try_generate(&(), 5).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(codes.issued(), [7u8]);
    }

    #[test]
    fn try_generate_with_zero_attempts_never_calls_strategy() {
        let mut mock = MockValueGenerator::new();
        mock.expect_generate().times(0);

        let mut codes = CodeGenerator::new(mock);
        assert!(codes.try_generate(&6, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "cycle budget spent")]
    fn generate_spins_when_space_is_exhausted() {
        const BUDGET: usize = 10_000;
        let calls = AtomicUsize::new(0);
        let mut codes = CodeGenerator::new(from_fn(move |_: &()| {
            if calls.fetch_add(1, Ordering::SeqCst) >= BUDGET {
                panic!("cycle budget spent");
            }
            "ONLY".to_string()
        }));

        assert_eq!(codes.generate(&()), "ONLY");
        codes.generate(&());
    }
}
