//! Whole-engine properties, exercised through the public API

use dom::{Document, DocumentBuilder, DomNode, DomSerializer, NodeId};
use editor::{Command, Dispatcher, EditError, Editor, EditorConfig, ScriptedInput, StatusLine};

fn outline() -> Document {
    DocumentBuilder::new()
        .open("header")
        .id("top")
        .text("Title")
        .close()
        .open("ol")
        .id("steps")
        .open("li")
        .id("one")
        .text("mix")
        .close()
        .open("li")
        .id("two")
        .open("em")
        .text("bake")
        .close()
        .close()
        .open("li")
        .id("three")
        .close()
        .close()
        .text("   ")
        .open("footer")
        .close()
        .build()
        .unwrap()
}

fn all_nodes(doc: &Document) -> Vec<NodeId> {
    doc.arena().find(|_| true)
}

/// Every attached node with all of its data, whitespace included
fn snapshot(doc: &Document) -> String {
    let nodes: Vec<&DomNode> = all_nodes(doc)
        .into_iter()
        .map(|id| doc.get(id).unwrap())
        .collect();
    serde_json::to_string(&nodes).unwrap()
}

fn assert_invariants(editor: &Editor) {
    let doc = editor.document();
    assert!(doc.is_consistent(), "ids or empty markers out of step");
    if let Some(cursor) = editor.cursor() {
        assert!(doc.arena().is_attached(cursor), "cursor on a detached node");
        assert!(doc.get(cursor).unwrap().is_element());
    }
    for node in all_nodes(doc) {
        let path = doc.to_path(node).unwrap();
        assert_eq!(doc.from_path(&path), Some(node));
    }
}

#[test]
fn path_round_trip_for_every_node() {
    let doc = outline();
    for node in all_nodes(&doc) {
        let path = doc.to_path(node).unwrap();
        assert_eq!(doc.from_path(&path), Some(node));
    }
}

#[test]
fn removing_root_changes_nothing() {
    let mut editor = Editor::with_document(EditorConfig::default(), outline());
    editor.execute(Command::MoveForward).unwrap();
    let before = snapshot(editor.document());

    assert!(matches!(
        editor.execute(Command::RemoveNode),
        Err(EditError::RootBoundary(_))
    ));

    assert_eq!(snapshot(editor.document()), before);
    assert_eq!(editor.cursor(), Some(editor.document().root_id()));
}

#[test]
fn snapshots_see_whitespace_the_markup_view_trims() {
    let split = DocumentBuilder::new()
        .open("p")
        .text("x")
        .text("   ")
        .close()
        .build()
        .unwrap();
    let padded = DocumentBuilder::new()
        .open("p")
        .text("  x ")
        .close()
        .build()
        .unwrap();

    let markup = DomSerializer::new();
    assert_eq!(
        markup.serialize(split.arena()).unwrap(),
        markup.serialize(padded.arena()).unwrap()
    );
    assert_ne!(snapshot(&split), snapshot(&padded));
}

#[test]
fn remove_relocation_three_siblings() {
    let ids = |e: &Editor, name: &str| e.document().lookup_id(name).unwrap();

    // Middle: next sibling
    let mut editor = Editor::with_document(EditorConfig::default(), outline());
    editor.focus(ids(&editor, "two")).unwrap();
    editor.execute(Command::RemoveNode).unwrap();
    assert_eq!(editor.cursor(), Some(ids(&editor, "three")));

    // Last: previous sibling
    let mut editor = Editor::with_document(EditorConfig::default(), outline());
    editor.focus(ids(&editor, "three")).unwrap();
    editor.execute(Command::RemoveNode).unwrap();
    assert_eq!(editor.cursor(), Some(ids(&editor, "two")));

    // Only child: parent
    let mut editor = Editor::with_document(EditorConfig::default(), outline());
    let two = ids(&editor, "two");
    editor.focus(two).unwrap();
    editor.execute(Command::MoveChild).unwrap();
    editor.execute(Command::RemoveNode).unwrap();
    assert_eq!(editor.cursor(), Some(two));
    assert!(editor
        .document()
        .arena()
        .element(two)
        .unwrap()
        .is_marked_empty());
}

#[test]
fn set_id_round_trip() {
    let input = ScriptedInput::new()
        .answer("foo")
        .answer("foo")
        .answer("")
        .answer("foo");
    let editor = Editor::with_document(EditorConfig::default(), outline());
    let mut d = Dispatcher::new(editor, input, StatusLine::default());
    let one = d.editor().document().lookup_id("one").unwrap();
    let two = d.editor().document().lookup_id("two").unwrap();

    d.editor_mut().focus(one).unwrap();
    d.dispatch(Command::SetId).unwrap();

    d.editor_mut().focus(two).unwrap();
    // No confirmation scripted: the move is declined
    assert_eq!(
        d.dispatch(Command::SetId),
        Err(EditError::DuplicateId("foo".into()))
    );
    assert_eq!(d.editor().document().lookup_id("foo"), Some(one));
    assert_eq!(d.editor().document().lookup_id("two"), Some(two));

    d.editor_mut().focus(one).unwrap();
    d.dispatch(Command::SetId).unwrap();
    d.editor_mut().focus(two).unwrap();
    d.dispatch(Command::SetId).unwrap();
    assert_eq!(d.editor().document().lookup_id("foo"), Some(two));
    assert!(d.editor().document().is_consistent());
}

#[test]
fn full_sweeps_visit_each_element_once() {
    let mut editor = Editor::with_document(EditorConfig::default(), outline());
    let order = editor.document().arena().elements_in_order();

    let mut forward = Vec::new();
    for _ in 0..order.len() + 3 {
        editor.execute(Command::MoveForward).unwrap();
        let at = editor.cursor().unwrap();
        if forward.last() != Some(&at) {
            forward.push(at);
        }
    }
    assert_eq!(forward, order);

    editor.execute(Command::ClearCursor).unwrap();
    let mut backward = Vec::new();
    for _ in 0..order.len() + 3 {
        editor.execute(Command::MoveBackward).unwrap();
        let at = editor.cursor().unwrap();
        if backward.last() != Some(&at) {
            backward.push(at);
        }
    }
    backward.reverse();
    assert_eq!(backward, order);
}

#[test]
fn sibling_navigation_wraps() {
    let mut editor = Editor::with_document(EditorConfig::default(), outline());
    let one = editor.document().lookup_id("one").unwrap();
    let three = editor.document().lookup_id("three").unwrap();

    editor.focus(three).unwrap();
    editor.execute(Command::MoveSiblingNext).unwrap();
    assert_eq!(editor.cursor(), Some(one));
    editor.execute(Command::MoveSiblingPrev).unwrap();
    assert_eq!(editor.cursor(), Some(three));
}

/// Small deterministic generator so the walk is reproducible
struct Lcg(u64);

impl Lcg {
    fn below(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

#[test]
fn invariants_hold_across_random_command_streams() {
    const ANSWERS: &[&str] = &["p", "section", "", "  ", "text", "id-1", "id-2", "bad id", "h2"];

    for seed in 0..8u64 {
        let mut rng = Lcg(seed);
        let mut input = ScriptedInput::new();
        for _ in 0..400 {
            input = input.answer(ANSWERS[rng.below(ANSWERS.len())]);
            input = input.confirm(rng.below(2) == 0);
        }

        let editor = Editor::with_document(EditorConfig::default(), outline());
        let mut d = Dispatcher::new(editor, input, StatusLine::default());

        for _ in 0..300 {
            let command = Command::ALL[rng.below(Command::ALL.len())];
            let before = snapshot(d.editor().document());
            let cursor = d.editor().cursor();

            if let Err(err) = d.dispatch(command) {
                // Rejected commands are all-or-nothing
                assert_eq!(snapshot(d.editor().document()), before, "{} left changes: {}", command, err);
                assert_eq!(d.editor().cursor(), cursor, "{} moved the cursor: {}", command, err);
            }
            assert!(!d.editor().is_frozen());
            assert_invariants(d.editor());
        }
    }
}
