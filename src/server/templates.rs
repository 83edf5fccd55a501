//! HTML templates for the labeling interface.

use crate::models::{Label, LabelingOptions, Record};
use crate::session::StoredSession;
use crate::utils::html_escape;

/// Base HTML template.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - rowlabel</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">rowlabel</a>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        html_escape(title),
        content
    )
}

/// Render the home page: upload form plus the list of stored sessions.
pub fn home(sessions: &[StoredSession]) -> String {
    let mut rows = String::new();
    for session in sessions {
        let progress = format!(
            "{} / {} labeled",
            session.labeled_count(),
            session.records.len()
        );
        let status = if session.is_complete() {
            r#"<span class="badge badge-done">complete</span>"#.to_string()
        } else {
            format!(
                r#"<span class="badge">at row {}</span>"#,
                session.cursor + 1
            )
        };
        rows.push_str(&format!(
            r#"
        <tr>
            <td><a href="/sessions/{}">{}</a></td>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
        </tr>
        "#,
            session.id,
            html_escape(&session.name),
            session.records.len(),
            progress,
            status
        ));
    }

    let sessions_section = if rows.is_empty() {
        "<p>No sessions yet. Upload a CSV to start labeling.</p>".to_string()
    } else {
        format!(
            r#"
    <table class="file-listing">
        <thead>
            <tr>
                <th>Session</th>
                <th>Rows</th>
                <th>Progress</th>
                <th>Status</th>
            </tr>
        </thead>
        <tbody>
            {}
        </tbody>
    </table>
    "#,
            rows
        )
    };

    format!(
        r#"
    <section class="card">
        <h2>New session</h2>
        <form action="/sessions" method="post" enctype="multipart/form-data">
            <label>CSV file
                <input type="file" name="file" accept=".csv,text/csv" required>
            </label>
            <label>Text column
                <input type="text" name="text_column" value="Content">
            </label>
            <label>Labels
                <select name="label_set">
                    <option value="binary">Positive / Negative</option>
                    <option value="ternary">Positive / Negative / Irrelevant</option>
                </select>
            </label>
            <label class="checkbox">
                <input type="checkbox" name="allow_backward" value="true" checked>
                Allow stepping back
            </label>
            <button type="submit">Start labeling</button>
        </form>
    </section>
    <section>
        <h2>Sessions</h2>
        {}
    </section>
    "#,
        sessions_section
    )
}

/// Render the labeling page for the record under the cursor.
pub fn annotate(
    session: &StoredSession,
    record: &Record,
    current_label: Option<Label>,
    options: LabelingOptions,
) -> String {
    let total = session.records.len();

    let mut choices = String::new();
    for label in options.label_set.labels() {
        let checked = if current_label == Some(*label) {
            " checked"
        } else {
            ""
        };
        choices.push_str(&format!(
            r#"
            <label class="choice">
                <input type="radio" name="label" value="{}"{} required>
                {}
            </label>
            "#,
            label.as_str(),
            checked,
            label.as_str()
        ));
    }

    let back_button = if options.allow_backward && record.position > 0 {
        format!(
            r#"
        <form action="/sessions/{}/back" method="post" class="inline">
            <button type="submit" class="btn-secondary">Back</button>
        </form>
        "#,
            session.id
        )
    } else {
        String::new()
    };

    format!(
        r#"
    <p class="progress">Row {} of {} &middot; {} labeled</p>
    <section class="card record">
        <blockquote>{}</blockquote>
    </section>
    <form action="/sessions/{}/label" method="post" class="label-form">
        <fieldset>
            <legend>Label</legend>
            {}
        </fieldset>
        <button type="submit">Save &amp; next</button>
    </form>
    {}
    {}
    "#,
        record.position + 1,
        total,
        session.labeled_count(),
        html_escape(&record.text),
        session.id,
        choices,
        back_button,
        download_links(session)
    )
}

/// Render the completion view shown once every record has been walked past.
pub fn complete(session: &StoredSession) -> String {
    let back_button = if session.options.allow_backward {
        format!(
            r#"
        <form action="/sessions/{}/back" method="post" class="inline">
            <button type="submit" class="btn-secondary">Back to last row</button>
        </form>
        "#,
            session.id
        )
    } else {
        String::new()
    };

    format!(
        r#"
    <p class="success">All {} rows labeled.</p>
    {}
    {}
    "#,
        session.records.len(),
        download_links(session),
        back_button
    )
}

/// Render a not-found page for a session id.
pub fn session_not_found(id: &str) -> String {
    format!(
        r#"<p>No session with id <code>{}</code>. <a href="/">Back to sessions</a>.</p>"#,
        html_escape(id)
    )
}

fn download_links(session: &StoredSession) -> String {
    let labeled = session.labeled_count();
    let partial_link = if session.cursor > 0 {
        format!(
            r#"<a href="/sessions/{}/export.csv?range=partial">Download labeled so far</a>"#,
            session.id
        )
    } else {
        String::new()
    };
    format!(
        r#"
    <section class="downloads">
        <a href="/sessions/{}/export.csv?range=full">Download all rows</a>
        {}
        <span class="hint">{} of {} labeled</span>
    </section>
    "#,
        session.id,
        partial_link,
        labeled,
        session.records.len()
    )
}
