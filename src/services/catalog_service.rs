use std::path::Path;
use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;
use crate::errors::FileError;
use crate::models::{AboutPage, BlogCategory, BlogPost, BlogPostDetail, Project};
use super::file_service::read_text;
use super::seed::{seed_blog_posts, BLOG_CATEGORIES};

/// Matches everything.
pub const ALL: &str = "all";

pub const ABOUT_FILE: &str = "content/about.md";

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    #[serde(default)]
    pub search: String,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ProjectQuery {
    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = project.title.to_lowercase().contains(&needle)
            || project.description.to_lowercase().contains(&needle);
        let matches_status = selects(self.status.as_deref(), project.status.as_str());
        let matches_category = selects(self.category.as_deref(), &project.category);

        matches_search && matches_status && matches_category
    }
}

pub fn filter_projects<'a>(projects: &'a [Project], query: &ProjectQuery) -> Vec<&'a Project> {
    projects.iter().filter(|p| query.matches(p)).collect()
}

pub fn featured_projects(projects: &[Project]) -> Vec<&Project> {
    projects.iter().filter(|p| p.is_featured).collect()
}

fn selects(filter: Option<&str>, value: &str) -> bool {
    match filter {
        None | Some("") | Some(ALL) => true,
        Some(wanted) => wanted == value,
    }
}

// ============================================================================
// Blog
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
}

impl BlogQuery {
    pub fn matches(&self, post: &BlogPost) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = post.title.to_lowercase().contains(&needle)
            || post.excerpt.to_lowercase().contains(&needle)
            || post.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));

        matches_search && selects(self.category.as_deref(), &post.category)
    }
}

#[derive(Debug, Clone)]
pub struct Blog {
    posts: Vec<BlogPost>,
}

impl Blog {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self { posts }
    }

    pub fn seeded() -> Self {
        Self::new(seed_blog_posts())
    }

    pub fn search(&self, query: &BlogQuery) -> Vec<&BlogPost> {
        self.posts.iter().filter(|p| query.matches(p)).collect()
    }

    /// The post shown in the hero slot: the first one.
    pub fn featured(&self) -> Option<&BlogPost> {
        self.posts.first()
    }

    /// Look a post up by slug. The input is slugified first, so
    /// `Color Theory For Textile Artists` finds `color-theory-for-textile-artists`.
    pub fn by_slug(&self, raw: &str) -> Option<&BlogPost> {
        let wanted = slug::slugify(raw);
        self.posts.iter().find(|p| p.slug == wanted)
    }

    pub fn detail(&self, raw_slug: &str) -> Option<BlogPostDetail> {
        self.by_slug(raw_slug).map(|post| BlogPostDetail {
            html: render_markdown(&post.content),
            post: post.clone(),
        })
    }

    pub fn categories(&self) -> Vec<BlogCategory> {
        BLOG_CATEGORIES
            .iter()
            .map(|(value, label)| BlogCategory {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect()
    }
}

// ============================================================================
// Markdown
// ============================================================================

pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// The about page source, rendered. A missing file reads as empty.
pub fn load_about(data_dir: &Path) -> Result<AboutPage, FileError> {
    let markdown = read_text(&data_dir.join(ABOUT_FILE))?.unwrap_or_default();
    Ok(AboutPage {
        html: render_markdown(&markdown),
        markdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed::seed_projects;

    fn query(search: &str, status: Option<&str>, category: Option<&str>) -> ProjectQuery {
        ProjectQuery {
            search: search.to_string(),
            status: status.map(str::to_string),
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn project_search_is_case_insensitive_over_title_and_description() {
        let projects = seed_projects();

        let hits = filter_projects(&projects, &query("SCARF", None, None));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        let hits = filter_projects(&projects, &query("garden motifs", None, None));
        assert_eq!(hits[0].id, 3);
    }

    #[test]
    fn project_filters_combine() {
        let projects = seed_projects();

        assert_eq!(filter_projects(&projects, &query("", Some("all"), Some("all"))).len(), 3);
        assert_eq!(filter_projects(&projects, &query("", Some("completed"), None)).len(), 1);
        assert!(filter_projects(&projects, &query("", Some("completed"), Some("knitting"))).is_empty());
        assert!(filter_projects(&projects, &query("", Some("finished"), None)).is_empty());
    }

    #[test]
    fn featured_projects_are_flagged_ones() {
        let projects = seed_projects();
        let ids: Vec<_> = featured_projects(&projects).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn blog_search_covers_tags() {
        let blog = Blog::seeded();
        let query = BlogQuery {
            search: "upcycl".to_string(),
            category: None,
        };
        let hits = blog.search(&query);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "sustainable-textile-crafts");
    }

    #[test]
    fn blog_category_filter() {
        let blog = Blog::seeded();
        let query = BlogQuery {
            search: String::new(),
            category: Some("guides".to_string()),
        };
        assert_eq!(blog.search(&query).len(), 1);
        assert_eq!(blog.categories()[0].value, ALL);
    }

    #[test]
    fn slug_lookup_normalizes_input() {
        let blog = Blog::seeded();
        assert_eq!(blog.by_slug("Color Theory For Textile Artists").map(|p| p.id), Some(4));
        assert!(blog.by_slug("nope").is_none());
        assert_eq!(blog.featured().map(|p| p.id), Some(1));
    }

    #[test]
    fn post_detail_renders_markdown() {
        let blog = Blog::seeded();
        let detail = blog.detail("getting-started-with-hand-embroidery").unwrap();
        assert!(detail.html.contains("<h2>Essential Supplies</h2>"));
        assert!(detail.html.contains("<strong>Cotton</strong>"));
    }

    #[test]
    fn about_page_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let about = load_about(dir.path()).unwrap();
        assert!(about.markdown.is_empty());
        assert!(about.html.is_empty());
    }

    #[test]
    fn about_page_is_rendered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("content")).unwrap();
        std::fs::write(dir.path().join(ABOUT_FILE), "# About me\n\nI knit.").unwrap();

        let about = load_about(dir.path()).unwrap();
        assert!(about.html.contains("<h1>About me</h1>"));
        assert!(about.html.contains("<p>I knit.</p>"));
    }
}
