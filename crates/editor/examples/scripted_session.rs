//! Scripted session example - building a list without a mouse

use dom::{DocumentBuilder, DomSerializer};
use editor::breadcrumb;
use editor::{Dispatcher, Editor, EditorConfig, ScriptedInput, StatusLine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let document = DocumentBuilder::new()
        .open("h1")
        .text("Groceries")
        .close()
        .open("ul")
        .id("list")
        .close()
        .build()?;

    let editor = Editor::with_document(EditorConfig::default(), document);
    let mut event_rx = editor.events().subscribe();

    let input = ScriptedInput::new()
        .answer("li")
        .answer("apples")
        .answer("li")
        .answer("pears");
    let mut dispatcher = Dispatcher::new(editor, input, StatusLine::default());

    let script = [
        "moveForward",     // body
        "moveChild",       // h1
        "moveSiblingNext", // ul
        "insertLastChild",
        "moveChild", // the new div
        "retag",
        "setText",
        "insertNext",
        "moveSiblingNext",
        "retag",
        "setText",
        "removeNode", // back on the first li
        "moveUp",
        "moveUp",
        "moveUp", // rejected: root has no parent
    ];

    for name in script {
        let result = dispatcher.dispatch_name(name);
        let crumbs = dispatcher.editor().breadcrumb()?;
        let status = if result.is_ok() { "ok" } else { "rejected" };
        println!("{:<16} {:<10} {}", name, status, breadcrumb::render(&crumbs));
        if let Some(message) = &dispatcher.errors().current {
            println!("{:<16} error: {}", "", message);
        }
    }

    while let Ok(event) = event_rx.try_recv() {
        println!("Event: {:?}", event);
    }

    let (editor, _, _) = dispatcher.into_parts();
    print!("{}", DomSerializer::new().serialize(editor.document().arena())?);

    Ok(())
}
