use std::cell::RefCell;
use std::ops::DerefMut;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use log::{info, warn};

use crate::generator::Generator;
use crate::input::Input;
use crate::model::Model;
use crate::output::Output;

type OutputPtr = Rc<RefCell<dyn Output>>;

/// Reads records from an [Input], builds the [Model] and runs every [Generator] against each of
/// its outputs.
pub struct Executor<I: Input> {
    input: I,
    generator_infos: Vec<GeneratorInfo>,
}

pub struct GeneratorInfo {
    generator: Box<dyn Generator>,
    outputs: Vec<OutputPtr>,
}

impl<I: Input> Executor<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            generator_infos: vec![],
        }
    }

    pub fn generator(self, generator: impl Generator + 'static) -> Self {
        self.generator_boxed(Box::new(generator))
    }

    pub fn generator_boxed(mut self, generator: Box<dyn Generator>) -> Self {
        self.generator_infos.push(GeneratorInfo {
            generator,
            outputs: vec![],
        });
        self
    }

    /// Add an output for the last-added [Generator].
    ///
    /// This method takes complete ownership of the output. If you want access to the output after
    /// execution, use [Executor::output_ptr].
    pub fn output(self, output: impl Output + 'static) -> Self {
        self.output_ptr(Rc::new(RefCell::new(output)))
    }

    /// Add an output for the last-added [Generator].
    ///
    /// The output is only borrowed mutably during [Executor::execute].
    pub fn output_ptr(mut self, output: OutputPtr) -> Self {
        self.generator_infos
            .last_mut()
            .expect("no generators added")
            .outputs
            .push(output);
        self
    }

    /// Number of outputs across all generators.
    pub fn output_count(&self) -> usize {
        self.generator_infos.iter().map(|info| info.outputs.len()).sum()
    }

    pub fn execute(mut self) -> Result<()> {
        if self.generator_infos.is_empty() {
            return Err(anyhow!("no 'generators' have been specified"));
        }
        for info in &self.generator_infos {
            if info.outputs.is_empty() {
                return Err(anyhow!(
                    "each 'generator' must have at least one 'output' specified"
                ));
            }
        }

        info!("Reading records...");
        let records = self.input.records()?;
        if records.is_empty() {
            warn!("No data to save");
        }

        info!("Building graph from {} records...", records.len());
        let model = Model::new(records);
        info!(
            "Graph has {} nodes and {} edges",
            model.graph().node_count(),
            model.graph().edge_count()
        );

        for mut info in self.generator_infos {
            for output in info.outputs {
                info!(
                    "Generating for generator '{:?}' to output '{:?}'...",
                    info.generator,
                    output.borrow()
                );
                let mut output = output.borrow_mut();
                info.generator.generate(&model, output.deref_mut())?;
                output.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use itertools::Itertools;

    use crate::generator::Generator;
    use crate::model::Model;
    use crate::output::Output;

    mod execute {
        use std::cell::RefCell;
        use std::rc::Rc;

        use anyhow::Result;

        use crate::executor::tests::{FakeGenerator, FailingInput};
        use crate::test_util::person;
        use crate::{input, output, Executor};

        #[test]
        fn happy_path() -> Result<()> {
            let input = input::Buffer::new(vec![person("1", &["2"]), person("2", &["1"])]);
            let output = Rc::new(RefCell::new(output::Buffer::default()));
            Executor::new(input)
                .generator(FakeGenerator::default())
                .output_ptr(output.clone())
                .execute()?;
            assert_eq!(output.borrow().to_string(), "1-2");
            Ok(())
        }

        #[test]
        fn calls_all_generators_with_correct_outputs() -> Result<()> {
            let input = input::Buffer::new(vec![
                person("a", &["b", "c"]),
                person("b", &["a"]),
                person("c", &["a"]),
            ]);
            let output0 = Rc::new(RefCell::new(output::Buffer::default()));
            let output1 = Rc::new(RefCell::new(output::Buffer::default()));
            let output2 = Rc::new(RefCell::new(output::Buffer::default()));
            let executor = Executor::new(input)
                .generator(FakeGenerator::new("/"))
                .output_ptr(output0.clone())
                .generator(FakeGenerator::new(":"))
                .output_ptr(output1.clone())
                .output_ptr(output2.clone());
            assert_eq!(executor.output_count(), 3);
            executor.execute()?;
            assert_eq!(output0.borrow().to_string(), "a-b/a-c");
            assert_eq!(output1.borrow().to_string(), "a-b:a-c");
            assert_eq!(output2.borrow().to_string(), "a-b:a-c");
            Ok(())
        }

        #[test]
        fn no_records_still_generates() -> Result<()> {
            let output = Rc::new(RefCell::new(output::Buffer::default()));
            Executor::new(input::Buffer::default())
                .generator(crate::generator::Json::default())
                .output_ptr(output.clone())
                .execute()?;
            assert_eq!(output.borrow().to_string(), "[]\n");
            Ok(())
        }

        #[test]
        fn input_errors_propagate() {
            let result = Executor::new(FailingInput)
                .generator(FakeGenerator::default())
                .output(output::Buffer::default())
                .execute();
            assert!(result.is_err());
        }
    }

    mod validation {
        use crate::executor::tests::FakeGenerator;
        use crate::executor::Executor;
        use crate::input;

        #[test]
        fn missing_generator() {
            let result = Executor::new(input::Buffer::default())
                // no generator
                .execute();
            assert!(result.is_err())
        }

        #[test]
        fn missing_output() {
            let result = Executor::new(input::Buffer::default())
                .generator(FakeGenerator::default())
                // no output
                .execute();
            assert!(result.is_err())
        }
    }

    struct FailingInput;

    impl crate::input::Input for FailingInput {
        fn records(&mut self) -> Result<Vec<crate::model::Person>> {
            Err(anyhow::anyhow!("unreadable"))
        }
    }

    /// Writes the graph's edges as `a-b` joined by `delimiter`.
    #[derive(Debug, Default, Clone)]
    struct FakeGenerator {
        delimiter: String,
    }

    impl FakeGenerator {
        pub fn new(delimiter: impl ToString) -> Self {
            Self {
                delimiter: delimiter.to_string(),
            }
        }
    }

    impl Generator for FakeGenerator {
        fn generate(&mut self, model: &Model, output: &mut dyn Output) -> Result<()> {
            let edges = model
                .graph()
                .edge_ids()
                .map(|(a, b)| format!("{}-{}", a, b))
                .join(&self.delimiter);
            output.write_str(&edges)?;
            Ok(())
        }
    }
}
