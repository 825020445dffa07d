//! Expands generated records into individual test invocations.
//!
//! A test asks for records by registering with an explicit [`DataRequest`]:
//! how many records (or the configured default) and which [`Projection`] it
//! wants them in. Tests registered with [`Suite::plain`] ask for nothing and
//! run once. Records are only generated for tests that asked, so a suite of
//! plain tests never touches the random source.

use crate::calculator::OperationFn;
use crate::config::Config;
use crate::error::Error;
use crate::generator::{generate_with_options, Expected, TestRecord};
use rand::Rng;
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, info};

/// A record with the operation given by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedCase {
    pub index: usize,
    pub a: Decimal,
    pub b: Decimal,
    pub operation: &'static str,
    pub expected: Expected,
}

/// A record with the operation given as the calculator function itself.
#[derive(Debug, Clone, Copy)]
pub struct FunctionCase {
    pub index: usize,
    pub a: Decimal,
    pub b: Decimal,
    pub operation: OperationFn,
    pub expected: Expected,
}

pub fn project_by_name(record: &TestRecord) -> NamedCase {
    NamedCase {
        index: record.index,
        a: record.a,
        b: record.b,
        operation: record.operation_name(),
        expected: record.expected,
    }
}

pub fn project_by_function(record: &TestRecord) -> FunctionCase {
    FunctionCase {
        index: record.index,
        a: record.a,
        b: record.b,
        operation: record.operation_fn(),
        expected: record.expected,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    ByName,
    ByFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRequest {
    /// `None` uses the configured record count.
    pub count: Option<usize>,
    pub projection: Projection,
}

impl DataRequest {
    pub fn resolved_count(&self, config: &Config) -> usize {
        self.count.unwrap_or(config.num_records)
    }
}

pub type NamedBody = fn(&NamedCase) -> Result<(), String>;
pub type FunctionBody = fn(&FunctionCase) -> Result<(), String>;
pub type PlainBody = fn() -> Result<(), String>;

#[derive(Clone, Copy)]
enum Body {
    Named(NamedBody),
    Function(FunctionBody),
    Plain(PlainBody),
}

struct Registered {
    name: String,
    body: Body,
    count: Option<usize>,
}

impl Registered {
    fn request(&self) -> Option<DataRequest> {
        let projection = match self.body {
            Body::Named(_) => Projection::ByName,
            Body::Function(_) => Projection::ByFunction,
            Body::Plain(_) => return None,
        };
        Some(DataRequest {
            count: self.count,
            projection,
        })
    }

    fn records<R: Rng + ?Sized>(&self, config: &Config, rng: &mut R) -> Result<Vec<TestRecord>, Error> {
        let count = self.request().map_or(0, |r| r.resolved_count(config));
        let records = generate_with_options(rng, count, config.generator).collect::<Result<Vec<_>, _>>()?;
        debug!(test = %self.name, count, "generated records");
        Ok(records)
    }
}

enum Call {
    Named(NamedBody, NamedCase),
    Function(FunctionBody, FunctionCase),
    Plain(PlainBody),
}

/// One collected test run: a body bound to at most one projected record.
pub struct Invocation {
    pub id: String,
    call: Call,
}

impl Invocation {
    pub fn run(&self) -> Result<(), String> {
        match &self.call {
            Call::Named(body, case) => body(case),
            Call::Function(body, case) => body(case),
            Call::Plain(body) => body(),
        }
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invocation {{ id: {:?} }}", self.id)
    }
}

#[derive(Default)]
pub struct Suite {
    tests: Vec<Registered>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_name(mut self, name: &str, body: NamedBody) -> Self {
        self.register(name, Body::Named(body));
        self
    }

    pub fn by_function(mut self, name: &str, body: FunctionBody) -> Self {
        self.register(name, Body::Function(body));
        self
    }

    pub fn plain(mut self, name: &str, body: PlainBody) -> Self {
        self.register(name, Body::Plain(body));
        self
    }

    /// Overrides the record count of the most recently registered test.
    /// Has no effect on plain tests.
    pub fn with_count(mut self, count: usize) -> Self {
        if let Some(last) = self.tests.last_mut() {
            last.count = Some(count);
        }
        self
    }

    fn register(&mut self, name: &str, body: Body) {
        self.tests.push(Registered {
            name: name.to_string(),
            body,
            count: None,
        });
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Requests declared by the registered tests, in registration order.
    pub fn requests(&self) -> Vec<(&str, DataRequest)> {
        self.tests
            .iter()
            .filter_map(|t| t.request().map(|r| (t.name.as_str(), r)))
            .collect()
    }

    /// Generates records for every test that asked for them and binds one
    /// invocation per record. Each requesting test gets its own sequence.
    pub fn collect<R: Rng + ?Sized>(&self, config: &Config, rng: &mut R) -> Result<Vec<Invocation>, Error> {
        let mut invocations = Vec::new();
        for test in &self.tests {
            match test.body {
                Body::Plain(body) => invocations.push(Invocation {
                    id: test.name.clone(),
                    call: Call::Plain(body),
                }),
                Body::Named(body) => {
                    for record in test.records(config, &mut *rng)? {
                        invocations.push(Invocation {
                            id: format!("{}[{}]", test.name, record.index),
                            call: Call::Named(body, project_by_name(&record)),
                        });
                    }
                }
                Body::Function(body) => {
                    for record in test.records(config, &mut *rng)? {
                        invocations.push(Invocation {
                            id: format!("{}[{}]", test.name, record.index),
                            call: Call::Function(body, project_by_function(&record)),
                        });
                    }
                }
            }
        }
        info!(tests = self.tests.len(), invocations = invocations.len(), "collection finished");
        Ok(invocations)
    }

    /// Collects, then runs every invocation in order.
    pub fn run<R: Rng + ?Sized>(&self, config: &Config, rng: &mut R) -> Result<Report, Error> {
        let invocations = self.collect(config, rng)?;
        let outcomes = invocations
            .iter()
            .map(|invocation| Outcome {
                id: invocation.id.clone(),
                result: invocation.run(),
            })
            .collect();
        Ok(Report { outcomes })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub id: String,
    pub result: Result<(), String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn success(&self) -> bool {
        self.failed() == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(()) => writeln!(f, "{}: PASS", outcome.id)?,
                Err(e) => writeln!(f, "{}: FAIL - {}", outcome.id, e)?,
            }
        }
        writeln!(f)?;
        writeln!(f, "=== Test Summary ===")?;
        writeln!(f, "Passed: {}", self.passed())?;
        writeln!(f, "Failed: {}", self.failed())?;
        write!(f, "Total:  {}", self.outcomes.len())
    }
}
