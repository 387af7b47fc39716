//! The interactive annotation loop.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use entlink::{
    normalize_link, AnnotatorConfig, Corpus, EntityType, EntlinkError, LinkAnnotations,
    LinkValidator, SuggestionEngine,
};

/// Messages for recoverable conditions; none of these end the loop.
mod warnings {
    pub const NO_ENTITY: &str = "no entity is selected, type \"n\" to select the next entity";
    pub const NO_SUGGESTION: &str = "there is no link suggestion";
    pub const UNKNOWN_COMMAND: &str = "unknown command, type \"h\" to see available commands";
}

const HELP: &str = "\
Commands:
  n, <enter>     show the next entity with context and a link suggestion
  y              accept the current link suggestion
  l              mark the current entity as deliberately not linkable
  l <link>       store a link; bare titles expand to Wikipedia URLs
  f <id> <link>  fix the annotation with the given identifier
  a              list all annotations
  a <filter>     list annotations whose surface text contains <filter>
  c <n>          set the context window size
  s              show annotation progress per file
  b              back up the annotation file
  h, ?           show this help
  q, quit        leave the tool";

/// One parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Next,
    AcceptSuggestion,
    StoreLink(String),
    FixLink(String),
    ListAnnotations(Option<String>),
    SetContextSize(String),
    Status,
    Backup,
    Help,
    Quit,
    Unknown,
}

impl Command {
    fn parse(input: &str) -> Self {
        let input = input.trim();
        match input {
            "" | "n" => Command::Next,
            "y" => Command::AcceptSuggestion,
            // Bare "l" is an explicit "not linkable" decision.
            "l" => Command::StoreLink("-".to_string()),
            "a" => Command::ListAnnotations(None),
            "s" | "status" => Command::Status,
            "b" | "backup" => Command::Backup,
            "h" | "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => {
                if let Some(rest) = input.strip_prefix("l ") {
                    Command::StoreLink(rest.trim().to_string())
                } else if let Some(rest) = input.strip_prefix("f ") {
                    Command::FixLink(rest.trim().to_string())
                } else if let Some(rest) = input.strip_prefix("a ") {
                    Command::ListAnnotations(Some(rest.trim().to_string()))
                } else if let Some(rest) = input.strip_prefix("c ") {
                    Command::SetContextSize(rest.trim().to_string())
                } else {
                    Command::Unknown
                }
            }
        }
    }
}

/// The annotation tool itself: dispatches user commands against the corpus,
/// the store, and the suggestion engine.
pub struct Annotator {
    corpus: Corpus,
    annotations: LinkAnnotations,
    config: AnnotatorConfig,
    validator: Box<dyn LinkValidator>,
    next_entity: Option<EntityType>,
    link_suggestion: Option<String>,
    verbose: bool,
}

impl Annotator {
    pub fn new(
        corpus: Corpus,
        annotations: LinkAnnotations,
        config: AnnotatorConfig,
        validator: Box<dyn LinkValidator>,
        verbose: bool,
    ) -> Self {
        Self {
            corpus,
            annotations,
            config,
            validator,
            next_entity: None,
            link_suggestion: None,
            verbose,
        }
    }

    /// Run the command loop until quit or end of input.
    ///
    /// Every user-level problem is reported as a warning and the loop
    /// continues; only store I/O failure propagates out.
    pub fn run(&mut self) -> entlink::Result<()> {
        self.show_status();

        let stdin = io::stdin();
        loop {
            print!("\n{} ", "entlink>".cyan());
            io::stdout().flush().map_err(|e| EntlinkError::Io {
                path: "<stdout>".into(),
                source: e,
            })?;

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => break, // end of input
                Ok(_) => {}
                Err(e) => {
                    return Err(EntlinkError::Io {
                        path: "<stdin>".into(),
                        source: e,
                    })
                }
            }

            let command = Command::parse(&line);
            if self.verbose {
                self.debug_state(&command);
            }
            match command {
                Command::Quit => break,
                Command::Next => self.show_next(),
                Command::AcceptSuggestion => self.accept_suggestion()?,
                Command::StoreLink(link) => self.store_link(&link)?,
                Command::FixLink(args) => self.fix_link(&args)?,
                Command::ListAnnotations(filter) => self.list_annotations(filter.as_deref()),
                Command::SetContextSize(raw) => self.set_context_size(&raw),
                Command::Status => self.show_status(),
                Command::Backup => self.backup(),
                Command::Help => println!("\n{}", HELP),
                Command::Unknown => warn(warnings::UNKNOWN_COMMAND),
            }
        }
        Ok(())
    }

    /// Advance the traversal and display the new current entity.
    fn show_next(&mut self) {
        self.next_entity = self.corpus.next(&self.annotations);
        self.link_suggestion = None;

        let entity = match &self.next_entity {
            Some(entity) => entity,
            None => {
                println!(
                    "\n{}",
                    "All entity types are annotated; nothing is outstanding.".green()
                );
                return;
            }
        };

        println!(
            "\n{} ({})\n",
            format!("[{}]", entity.text).bold(),
            entity.class
        );

        if let Some(file) = self.corpus.file(&entity.document) {
            for mention in &entity.mentions {
                let (left, right) = file.context(*mention, self.config.context_size);
                let padding = self.config.context_size.saturating_sub(left.chars().count());
                println!(
                    "    {}{}[{}]{}",
                    " ".repeat(padding),
                    left,
                    entity.text.blue(),
                    right
                );
            }
        }

        let engine = SuggestionEngine::from_store(&self.annotations);
        self.link_suggestion = engine.suggest(&entity.text).map(str::to_string);
        if let Some(suggestion) = &self.link_suggestion {
            println!("\nLink suggestion: {}", suggestion);
        }
    }

    /// Store the current suggestion for the current entity.
    fn accept_suggestion(&mut self) -> entlink::Result<()> {
        let entity = match self.next_entity.clone() {
            Some(entity) => entity,
            None => {
                warn(warnings::NO_ENTITY);
                return Ok(());
            }
        };
        match self.link_suggestion.clone() {
            Some(link) => {
                self.annotations.add_link(&entity, &link)?;
                self.show_next();
            }
            None => {
                warn(warnings::NO_SUGGESTION);
                self.show_next();
            }
        }
        Ok(())
    }

    /// Normalize, validate, and store a user-entered link.
    fn store_link(&mut self, raw: &str) -> entlink::Result<()> {
        let entity = match self.next_entity.clone() {
            Some(entity) => entity,
            None => {
                warn(warnings::NO_ENTITY);
                return Ok(());
            }
        };

        let link = normalize_link(raw);
        if self.link_is_valid(&link) {
            self.annotations.add_link(&entity, &link)?;
            if self.verbose {
                self.show_recent();
            }
        } else {
            warn(&EntlinkError::InvalidLink(link).to_string());
        }
        self.show_next();
        Ok(())
    }

    /// Append a correction for an existing record.
    fn fix_link(&mut self, args: &str) -> entlink::Result<()> {
        let old = match parse_correction_target(&self.annotations, args) {
            Ok(record) => record,
            Err(e) => {
                warn(&e.to_string());
                return Ok(());
            }
        };
        // parse_correction_target established the "<id> <link>" shape.
        let raw_link = args.split_once(' ').map(|(_, link)| link).unwrap_or("-");

        let link = normalize_link(raw_link);
        if self.link_is_valid(&link) {
            let fixed = self.annotations.create_link(&link, &old);
            self.annotations.save_annotation(fixed)?;
        } else {
            warn(&EntlinkError::InvalidLink(link).to_string());
        }
        Ok(())
    }

    /// Check a normalized link, reporting transport failures as warnings.
    fn link_is_valid(&self, link: &str) -> bool {
        match self.validator.validate(link) {
            Ok(valid) => valid,
            Err(e) => {
                warn(&format!("could not validate '{}': {}", link, e));
                false
            }
        }
    }

    fn list_annotations(&self, filter: Option<&str>) {
        match filter {
            None => {
                println!("\nCurrent annotations:\n");
                for record in self.annotations.iter() {
                    println!("{}", record.pretty_line());
                }
            }
            Some(term) => {
                println!("\nAnnotations matching '{}':\n", term);
                let needle = term.to_lowercase();
                for record in self.annotations.iter() {
                    if record.text.to_lowercase().contains(&needle) {
                        println!("{}", record.pretty_line());
                    }
                }
            }
        }
    }

    fn set_context_size(&mut self, raw: &str) {
        match self.config.set_context_size(raw) {
            Ok(size) => println!("\nContext size set to {}", size),
            Err(e) => warn(&e.to_string()),
        }
    }

    fn show_status(&self) {
        let status = self.corpus.status(&self.annotations);
        println!("\n{}\n", "Annotation progress".bold());
        for file in &status.files {
            println!(
                "    {:<32} {:>5} {:>4.0}%",
                file.name, file.total_types, file.percent_done
            );
        }
        println!(
            "    {:<32} {:>5} {:>4.0}%",
            "", status.total_types, status.percent_done
        );
    }

    fn backup(&self) {
        match self.annotations.backup() {
            Ok(path) => println!("\nBacked up annotations to {}", path.display()),
            Err(e) => warn(&format!("backup failed: {}", e)),
        }
    }

    fn show_recent(&self) {
        for record in self.annotations.recent(5) {
            println!("{}", record.pretty_line());
        }
    }

    fn debug_state(&self, command: &Command) {
        println!("    command          =  {:?}", command);
        println!("    link_suggestion  =  {:?}", self.link_suggestion);
        println!(
            "    next_entity      =  {:?}",
            self.next_entity.as_ref().map(|e| &e.text)
        );
    }
}

fn warn(message: &str) {
    println!("\n{} {}", "WARNING:".red().bold(), message);
}

/// Resolve "f <id> ..." input to the record being corrected.
///
/// A bad identifier is a user input error (`MalformedCorrection`), reported
/// distinctly from a link that fails validation.
fn parse_correction_target(
    annotations: &LinkAnnotations,
    args: &str,
) -> entlink::Result<entlink::LinkAnnotation> {
    let (identifier, _) = args.split_once(' ').ok_or_else(|| {
        EntlinkError::MalformedCorrection(
            "fix takes an identifier and a link, e.g. \"f 3 Jane_Doe\"".to_string(),
        )
    })?;
    let identifier: u64 = identifier.trim().parse().map_err(|_| {
        EntlinkError::MalformedCorrection(format!(
            "'{}' is not an annotation identifier",
            identifier.trim()
        ))
    })?;
    let record = annotations.get_annotation(identifier).map_err(|_| {
        EntlinkError::MalformedCorrection(format!("no annotation with identifier {}", identifier))
    })?;
    Ok(record.clone())
}
