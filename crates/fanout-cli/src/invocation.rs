use fanout_core::{CoreError, PropertyRegistry};
use fanout_model::{PropertyValue, RequestedTasks};

/// Parsed command line: `fanout [-Pname[=value] ...] [TASK ...] [-- COMMAND ARGS ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tasks: RequestedTasks,
    /// Properties given as `-Pname=value`; a bare `-Pname` is an empty text value.
    pub properties: Vec<(String, PropertyValue)>,
    /// Build command run under the monitor, if any.
    pub command: Option<Vec<String>>,
}

impl Invocation {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tasks = Vec::new();
        let mut properties = Vec::new();
        let mut command: Option<Vec<String>> = None;

        for arg in args.into_iter().map(Into::into) {
            match command.as_mut() {
                Some(cmd) => cmd.push(arg),
                None if arg == "--" => command = Some(Vec::new()),
                None => match parse_property(&arg) {
                    Some(prop) => properties.push(prop),
                    None => tasks.push(arg),
                },
            }
        }

        Self {
            tasks: RequestedTasks::from(tasks),
            properties,
            command: command.filter(|c| !c.is_empty()),
        }
    }

    /// Store the command-line properties in `props`.
    ///
    /// Runs before the configuration pass, so a value set here conflicts with
    /// a different value derived from the requested tasks.
    pub fn seed(&self, props: &mut PropertyRegistry) -> Result<(), CoreError> {
        for (name, value) in &self.properties {
            props.set(name.as_str(), value.clone())?;
        }
        Ok(())
    }
}

fn parse_property(arg: &str) -> Option<(String, PropertyValue)> {
    let rest = arg.strip_prefix("-P")?;
    let (name, value) = rest.split_once('=').unwrap_or((rest, ""));
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), PropertyValue::from(value)))
}

#[cfg(test)]
mod tests {
    use fanout_core::{InMemoryTaskGraph, configure};

    use super::*;

    #[test]
    fn tasks_only() {
        let inv = Invocation::parse(["sanityCheck", ":core:quickTest"]);
        assert_eq!(inv.tasks.len(), 2);
        assert!(inv.command.is_none());
    }

    #[test]
    fn tasks_and_command() {
        let inv = Invocation::parse(["platformTest", "--", "./gradlew", "platformTest", "--"]);
        assert_eq!(inv.tasks.as_slice(), &["platformTest".to_string()]);
        assert_eq!(
            inv.command,
            Some(vec![
                "./gradlew".to_string(),
                "platformTest".to_string(),
                "--".to_string()
            ])
        );
    }

    #[test]
    fn empty_command_is_none() {
        let inv = Invocation::parse(["soakTest", "--"]);
        assert!(inv.command.is_none());
        assert!(inv.tasks.contains("soakTest"));
    }

    #[test]
    fn properties_are_split_from_tasks() {
        let inv = Invocation::parse(["-PtestVersions=all", "platformTest", "-PskipDocs"]);
        assert_eq!(inv.tasks.as_slice(), &["platformTest".to_string()]);
        assert_eq!(
            inv.properties,
            vec![
                ("testVersions".to_string(), PropertyValue::from("all")),
                ("skipDocs".to_string(), PropertyValue::from("")),
            ]
        );
    }

    #[test]
    fn property_flags_after_separator_belong_to_command() {
        let inv = Invocation::parse(["--", "./gradlew", "-PtestVersions=all"]);
        assert!(inv.properties.is_empty());
        assert_eq!(
            inv.command,
            Some(vec!["./gradlew".to_string(), "-PtestVersions=all".to_string()])
        );
    }

    #[test]
    fn nameless_property_flag_is_a_task() {
        let inv = Invocation::parse(["-P", "-P=x"]);
        assert!(inv.properties.is_empty());
        assert_eq!(inv.tasks.len(), 2);
    }

    #[test]
    fn seeded_property_conflicts_with_requested_tasks() {
        let inv = Invocation::parse(["-PtestVersions=all", "platformTest"]);
        let mut graph = InMemoryTaskGraph::new();
        let mut props = PropertyRegistry::new();
        inv.seed(&mut props).unwrap();

        let err = configure(&inv.tasks, &mut graph, &mut props).unwrap_err();
        match err {
            CoreError::ConflictingProperty { name, value, existing } => {
                assert_eq!(name, "testVersions");
                assert_eq!(value, "partial");
                assert_eq!(existing, "all");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn seeded_property_with_same_value_is_noop() {
        let inv = Invocation::parse(["-PtestVersions=partial", "platformTest"]);
        let mut graph = InMemoryTaskGraph::new();
        let mut props = PropertyRegistry::new();
        inv.seed(&mut props).unwrap();

        configure(&inv.tasks, &mut graph, &mut props).unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(
            props.get("testVersions"),
            Some(&PropertyValue::from("partial"))
        );
    }

    #[test]
    fn nothing() {
        let inv = Invocation::parse(Vec::<String>::new());
        assert!(inv.tasks.is_empty());
        assert!(inv.command.is_none());
    }
}
