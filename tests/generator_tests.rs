use std::path::{Path, PathBuf};

use minionsuite::generator::GeneratedFile;
use minionsuite::model::ModelMetadata;
use minionsuite::{get_generator, GeneratorKind, GeneratorOptions, ScaffoldError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn options(model: &str, namespace: &str) -> GeneratorOptions {
    GeneratorOptions {
        model_path: Some(fixture(model).to_string_lossy().into_owned()),
        namespace: Some(namespace.to_string()),
        ..GeneratorOptions::default()
    }
}

fn render(kind: GeneratorKind, options: &GeneratorOptions) -> Vec<GeneratedFile> {
    get_generator(kind).render(options).unwrap()
}

fn file<'a>(files: &'a [GeneratedFile], name: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.contents.as_str())
        .unwrap_or_else(|| panic!("{name} not rendered"))
}

#[test]
fn test_post_metadata() {
    let meta = ModelMetadata::load(fixture("Post.cs").to_str().unwrap()).unwrap();

    assert_eq!(meta.name(), "Post");
    assert_eq!(meta.plural_name(), "Posts");
    assert_eq!(meta.namespace(), "Blog.Models");
    assert_eq!(meta.key_name(), "Id");
    // Guid is not a supported kind
    assert!(meta.property("Signature").is_none());
    let filled: Vec<&str> = meta.filled_properties().map(|p| p.name()).collect();
    assert_eq!(filled, ["Title", "Body", "TotalViews", "Rating"]);
    assert!(meta.has_created_at() && meta.has_updated_at());
}

#[test]
fn test_key_attribute_wins_over_id() {
    let meta = ModelMetadata::load(fixture("Article.cs").to_str().unwrap()).unwrap();

    assert_eq!(meta.key_name(), "ArticleNumber");
    assert_eq!(meta.key_type(), "long");
    assert_eq!(meta.plural_name(), "Articles");

    let files = render(GeneratorKind::Service, &options("Article.cs", "Blog.Services"));
    let class = file(&files, "ArticleService.cs");
    assert!(class.contains("public Task<Article> GetAsync(long key)"));
    assert!(class.contains("FirstOrDefaultAsync(f => f.ArticleNumber == key)"));
    assert!(class.contains("newEntity.Id = model.Id;"));
    assert!(class.contains("case \"Id\":"));
}

#[test]
fn test_model_without_key() {
    let err = get_generator(GeneratorKind::ApiController)
        .render(&options("Tag.cs", "Blog"))
        .unwrap_err();
    assert!(matches!(err, ScaffoldError::KeyNotFound { model } if model == "Tag"));
}

#[test]
fn test_service_without_string_properties() {
    let files = render(GeneratorKind::Service, &options("Counter.cs", "Blog.Services"));

    let interface = file(&files, "ICounterService.cs");
    assert!(!interface.contains("SearchAsync"));
    assert!(interface.contains("Task<bool> DeleteAsync(long key);"));
    let class = file(&files, "CounterService.cs");
    assert!(!class.contains("Contains(term)"));
    assert!(!class.contains("DateTime.UtcNow"));
}

#[test]
fn test_service_tests_for_boolean_free_sorting() {
    let files = render(GeneratorKind::ServiceTest, &options("Post.cs", "Blog.Tests"));
    let tests = file(&files, "PostServiceTests.cs");

    assert!(tests.contains("var page = await _service.GetAllAsync(1, 1, \"Title\", false);"));
    assert!(tests.contains("var entities = await _service.SearchAsync(\"2\");"));
    assert!(tests.contains("Assert.Equal(entity.Rating, entities[0].Rating);"));
    assert!(tests.contains("using Blog.Models;"));
}

#[test]
fn test_mvc_controller_test_with_factory() {
    let mut options = options("Post.cs", "Blog.Tests");
    options.generate_web_application_factory = true;
    let files = render(GeneratorKind::MvcControllerTest, &options);

    let tests = file(&files, "PostsControllerTests.cs");
    assert!(tests.contains("public class PostsControllerTests : IClassFixture<CustomWebApplicationFactory>"));
    assert!(tests.contains("var response = await _client.GetAsync(\"/Posts/Details/0\");"));
    assert!(tests.contains("Rating = (decimal)index,"));

    let factory = file(&files, "CustomWebApplicationFactory.cs");
    assert!(factory.contains("namespace Blog.Tests\n"));
}

#[test]
fn test_same_namespace_is_not_imported_twice() {
    let files = render(GeneratorKind::ApiController, &options("Post.cs", "Blog.Models"));
    let controller = file(&files, "PostsController.cs");
    assert!(!controller.contains("using Blog.Models;"));
    assert!(controller.contains("namespace Blog.Models\n{\n"));
}
