//! Demo problems for `--offline` runs without a practice server.

use practice_core::Clock;
use practice_core::model::{Problem, ProblemId};
use storage::InMemoryRepository;

struct DemoProblem {
    name: &'static str,
    question: &'static str,
    options: &'static [&'static str],
    correct: usize,
    explanation: &'static str,
}

const DEMO_PROBLEMS: &[DemoProblem] = &[
    DemoProblem {
        name: "bytes_to_bits",
        question: "How many bits are in **64 KiB**?",
        options: &["524,288", "512,000", "65,536", "64,000"],
        correct: 0,
        explanation: "$64 \\times 1024 \\times 8 = 524{,}288$ bits.",
    },
    DemoProblem {
        name: "powers_of_two",
        question: "What is $2^{16}$?",
        options: &["32,768", "65,536", "131,072", "16,384"],
        correct: 1,
        explanation: "$2^{10} = 1024$, so $2^{16} = 1024 \\times 64 = 65{,}536$.",
    },
    DemoProblem {
        name: "arithmetic_intensity",
        question: "A kernel does 2 FLOPs per 8 bytes loaded. What is its arithmetic intensity?",
        options: &["4 FLOP/byte", "0.25 FLOP/byte", "16 FLOP/byte", "2 FLOP/byte"],
        correct: 1,
        explanation: "Intensity is FLOPs divided by bytes: $2 / 8 = 0.25$.",
    },
    DemoProblem {
        name: "unit_conversion",
        question: "How many milliseconds are in $2.5$ minutes?",
        options: &["15,000", "150,000", "2,500", "1,500"],
        correct: 1,
        explanation: "$2.5 \\times 60 \\times 1000 = 150{,}000$ ms.",
    },
];

/// Build an in-memory backend holding the demo problem set.
///
/// # Errors
///
/// Returns an error if a demo problem is rejected or the store cannot be written.
pub fn demo_repository(clock: Clock) -> Result<InMemoryRepository, Box<dyn std::error::Error>> {
    let repo = InMemoryRepository::new().with_clock(clock);
    for (id, demo) in (1_u64..).zip(DEMO_PROBLEMS) {
        let problem = Problem::new(
            ProblemId::new(id),
            demo.question,
            demo.options.iter().map(|option| (*option).to_string()).collect(),
            demo.correct,
        )?
        .with_explanation(Some(demo.explanation.to_string()));
        repo.seed_problem(demo.name, problem)?;
    }
    Ok(repo)
}
