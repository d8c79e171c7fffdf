//! Reference dispatcher
//!
//! Glues an `Editor` to an input provider and an error sink: clears the
//! error line, runs the command, answers any input request on the spot
//! and reports failures verbatim. A UI with asynchronous prompts would
//! drive `Editor::execute`/`Editor::resume` itself instead.

use crate::command::Command;
use crate::editor::{Editor, Outcome};
use crate::error::{EditError, Result};
use crate::input::{ErrorSink, InputProvider, InputPurpose, InputRequest};

pub struct Dispatcher<P, S> {
    editor: Editor,
    input: P,
    errors: S,
}

impl<P: InputProvider, S: ErrorSink> Dispatcher<P, S> {
    pub fn new(editor: Editor, input: P, errors: S) -> Self {
        Self {
            editor,
            input,
            errors,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn input(&self) -> &P {
        &self.input
    }

    pub fn errors(&self) -> &S {
        &self.errors
    }

    pub fn into_parts(self) -> (Editor, P, S) {
        (self.editor, self.input, self.errors)
    }

    /// Run a command by action name
    pub fn dispatch_name(&mut self, name: &str) -> Result<Outcome> {
        match name.parse::<Command>() {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                self.errors.clear();
                self.errors.report(&err.to_string());
                Err(err)
            }
        }
    }

    /// Run a command to completion, prompting if it asks for input
    ///
    /// Failures are reported to the sink and also returned.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        self.errors.clear();

        let result = self.drive(command);
        if let Err(err) = &result {
            tracing::debug!("[Dispatcher] {} failed: {}", command, err);
            self.errors.report(&err.to_string());
        }
        result
    }

    fn drive(&mut self, command: Command) -> Result<Outcome> {
        let request = match self.editor.execute(command)? {
            Outcome::Pending(request) => request,
            outcome => return Ok(outcome),
        };

        let answer = self.input.request_text(&request.prompt, &request.initial);
        match self.editor.resume(request.ticket, answer) {
            Err(EditError::DuplicateId(id)) if request.purpose == InputPurpose::Id => {
                self.offer_id_move(&request, id)
            }
            other => other,
        }
    }

    /// The engine refuses to steal ids; ask the user whether to move it
    fn offer_id_move(&mut self, request: &InputRequest, id: String) -> Result<Outcome> {
        let prompt = format!("{} ({})", self.editor.config().prompts.move_id, id);
        if !self.input.request_confirmation(&prompt) {
            tracing::debug!("[Dispatcher] ticket {}: id {:?} left in place", request.ticket.0, id);
            return Err(EditError::DuplicateId(id));
        }
        self.editor.move_id_here(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::input::{ScriptedInput, StatusLine};
    use dom::DocumentBuilder;

    fn dispatcher(input: ScriptedInput) -> Dispatcher<ScriptedInput, StatusLine> {
        let doc = DocumentBuilder::new()
            .open("p")
            .id("taken")
            .text("hello")
            .close()
            .leaf("p")
            .build()
            .unwrap();
        let editor = Editor::with_document(EditorConfig::default(), doc);
        Dispatcher::new(editor, input, StatusLine::default())
    }

    fn go(d: &mut Dispatcher<ScriptedInput, StatusLine>, names: &[&str]) {
        for name in names {
            let _ = d.dispatch_name(name);
        }
    }

    #[test]
    fn test_errors_reach_the_sink_verbatim() {
        let mut d = dispatcher(ScriptedInput::new());
        assert!(d.dispatch(Command::RemoveNode).is_err());
        assert_eq!(d.errors().current.as_deref(), Some("No node selected"));

        // The next command clears the line first
        d.dispatch(Command::MoveForward).unwrap();
        assert!(d.errors().current.is_none());
    }

    #[test]
    fn test_unknown_name_is_reported() {
        let mut d = dispatcher(ScriptedInput::new());
        assert!(d.dispatch_name("toggleHelp").is_err());
        assert_eq!(
            d.errors().current.as_deref(),
            Some("Unknown command: toggleHelp")
        );
    }

    #[test]
    fn test_prompted_commands_apply_answers() {
        let mut d = dispatcher(ScriptedInput::new().answer("h2").answer("Title"));
        go(&mut d, &["moveForward", "moveChild", "retag", "setText"]);

        let editor = d.editor();
        let cursor = editor.cursor().unwrap();
        assert_eq!(editor.document().get(cursor).unwrap().tag_name(), Some("h2"));
        assert_eq!(editor.document().text_content(cursor).unwrap(), "Title");
        assert_eq!(editor.document().lookup_id("taken"), Some(cursor));

        let prompts = &d.input().prompts;
        assert_eq!(prompts[0].1, "p");
        assert_eq!(prompts[1].1, "hello");
    }

    #[test]
    fn test_cancel_is_not_an_error() {
        let mut d = dispatcher(ScriptedInput::new().cancel());
        go(&mut d, &["moveForward", "moveChild"]);
        assert_eq!(d.dispatch(Command::Retag).unwrap(), Outcome::Cancelled);
        assert!(d.errors().current.is_none());
        assert!(!d.editor().is_frozen());
    }

    #[test]
    fn test_duplicate_id_declined() {
        let mut d = dispatcher(ScriptedInput::new().answer("taken").confirm(false));
        go(&mut d, &["moveForward", "moveChild", "moveSiblingNext"]);
        let second = d.editor().cursor().unwrap();

        assert_eq!(
            d.dispatch(Command::SetId),
            Err(EditError::DuplicateId("taken".into()))
        );
        assert_ne!(d.editor().document().lookup_id("taken"), Some(second));
        assert_eq!(
            d.errors().current.as_deref(),
            Some("ID already exists in the document: taken")
        );
    }

    #[test]
    fn test_duplicate_id_moved_on_confirm() {
        let mut d = dispatcher(ScriptedInput::new().answer("taken").confirm(true));
        go(&mut d, &["moveForward", "moveChild"]);
        let first = d.editor().cursor().unwrap();
        go(&mut d, &["moveSiblingNext"]);
        let second = d.editor().cursor().unwrap();

        assert_eq!(d.dispatch(Command::SetId).unwrap(), Outcome::Applied);
        assert_eq!(d.editor().document().lookup_id("taken"), Some(second));
        assert!(d.editor().document().get(first).unwrap().id().is_none());
        assert!(d.editor().document().is_consistent());
    }
}
