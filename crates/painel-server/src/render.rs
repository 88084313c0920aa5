//! HTML fragments swapped in by htmx on the landing page.

use std::fmt::Write;

use painel_store::{Project, Task};

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Sidebar button for one project.
pub fn project_item(project: &Project) -> String {
    format!(
        r##"<button hx-target="#project-painel" hx-get="/view/project/{id}/panel" hx-swap="outerHTML" value="{id}" class="flex items-center w-full hover:bg-black/10 rounded px-2">
  <div style="background: {color}" class="w-3 h-3 rounded-full mr-4"></div>
  <p class="text-2xl">{name}</p>
  <span class="text-md ml-auto">{count}</span>
</button>
"##,
        id = project.id,
        color = escape_html(&project.color),
        name = escape_html(&project.name),
        count = project.task_count(),
    )
}

/// Every project button, in ownership order.
pub fn project_list(projects: &[Project]) -> String {
    projects.iter().map(project_item).collect()
}

/// Task panel with the "Pendentes" and "Finalizados" sections.
pub fn task_panel(project: &Project) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<section id="project-painel" class="bg-slate-200 p-4 overflow-visible max-h-full">
  <h2 class="text-center text-3xl select-none">{}</h2>
"#,
        escape_html(&project.name)
    );

    task_section(&mut out, project, "Pendentes", "mb-4", project.pending());
    task_section(&mut out, project, "Finalizados", "", project.finished());

    out.push_str("</section>\n");
    out
}

fn task_section<'a>(
    out: &mut String,
    project: &Project,
    title: &str,
    extra_class: &str,
    tasks: impl Iterator<Item = &'a Task>,
) {
    let _ = write!(
        out,
        r#"  <h3 class="text-2xl">{title}</h3>
  <ol class="list-none grid grid-cols-2 gap-4 {extra_class}">
"#
    );
    for task in tasks {
        task_row(out, project, task);
    }
    out.push_str("  </ol>\n");
}

fn task_row(out: &mut String, project: &Project, task: &Task) {
    let checked = if task.finished { " checked" } else { "" };
    let _ = write!(
        out,
        r##"    <li class="flex border-l-2 border-solid border-slate-500 p-2">
      <form>
        <div class="flex mb-2">
          <label class="checkbox_container">
            <input name="finished" type="checkbox"{checked} hx-put="/view/project/{project_id}/panel/task/{task_id}" hx-target="#project-painel">
            <span class="checkmark"></span>
          </label>
          <p class="text-xl">{name}</p>
        </div>
        <p class="text-lg">{description}</p>
"##,
        project_id = project.id,
        task_id = task.id,
        name = escape_html(&task.name),
        description = escape_html(&task.description),
    );
    if let Some(start) = task.start_date {
        let _ = writeln!(
            out,
            r#"        <time class="text-sm" datetime="{}">{}</time>"#,
            start.to_rfc3339(),
            start.format("%d/%m/%Y")
        );
    }
    out.push_str("      </form>\n    </li>\n");
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use painel_store::Seed;

    use super::*;

    /// Text between the section heading and the closing list tag.
    fn section<'a>(html: &'a str, title: &str) -> &'a str {
        let heading = format!(">{title}</h3>");
        let start = html.find(&heading).unwrap();
        let rest = &html[start..];
        &rest[..rest.find("</ol>").unwrap()]
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_project_item() {
        let project = &Seed::default().instantiate()[0];
        let html = project_item(project);

        assert!(html.contains(&format!("/view/project/{}/panel", project.id)));
        assert!(html.contains(">Desenvolvimento</p>"));
        assert!(html.contains("background: #888888"));
        assert!(html.contains(r#"<span class="text-md ml-auto">5</span>"#));
    }

    #[test]
    fn test_project_list_renders_each_project() {
        let projects = Seed::default().instantiate();
        let html = project_list(&projects);
        assert_eq!(html.matches("<button").count(), 2);
        assert!(html.find("Desenvolvimento").unwrap() < html.find("Cozinha").unwrap());
    }

    #[test]
    fn test_task_panel_splits_by_finished_flag() {
        let project = &Seed::default().instantiate()[0];
        let html = task_panel(project);

        let pending = section(&html, "Pendentes");
        let finished = section(&html, "Finalizados");
        assert!(pending.contains("Complete Project Proposal"));
        assert!(!pending.contains("Research Market Trends"));
        assert!(finished.contains("Research Market Trends"));
        assert_eq!(finished.matches(" checked").count(), 1);
        assert!(html.contains(&format!(
            "/view/project/{}/panel/task/{}",
            project.id, project.uncategorized_tasks[0].id
        )));
    }

    #[test]
    fn test_task_panel_escapes_user_text() {
        let mut project = Seed::default().instantiate().remove(0);
        project.name = "<script>".to_string();
        project.uncategorized_tasks[0].description = "a < b".to_string();

        let html = task_panel(&project);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_task_panel_start_date() {
        let mut project = Seed::default().instantiate().remove(0);
        project.uncategorized_tasks[0].start_date =
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap());

        let html = task_panel(&project);
        assert!(html.contains(">09/03/2024</time>"));
    }
}
