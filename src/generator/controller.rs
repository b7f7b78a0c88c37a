//! `apicontroller` and `mvccontroller`: CRUD controllers over the service interface.

use super::emit::{Block, Method, TypeDecl};
use super::{help_text, model_file, GeneratedFile, Generator, GeneratorKind, GeneratorOptions};
use super::{MODEL_PATH_PARAM, NAMESPACE_PARAM, OUTPUT_PARAM};
use crate::error::Result;
use crate::model::ModelMetadata;

const PAGE_SIZE_PARAM: (&str, &str) = (
    "--page-size <count>",
    "Items per page of the list action (default: 20).",
);

/// `apicontroller`: emits a JSON `{Plural}Controller.cs` under `api/[controller]`
pub struct ApiControllerGenerator;

impl Generator for ApiControllerGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ApiController
    }

    fn render(&self, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        let namespace = options.namespace()?;
        let meta = options.load_model()?;
        Ok(vec![GeneratedFile::new(
            format!("{}Controller.cs", meta.plural_name()),
            api_controller(namespace, &meta, options.page_size),
        )])
    }

    fn help(&self) -> String {
        help_text(
            self.kind(),
            "Generates an API controller with CRUD operations on a model class.",
            &[MODEL_PATH_PARAM, NAMESPACE_PARAM, OUTPUT_PARAM, PAGE_SIZE_PARAM],
        )
    }
}

/// `mvccontroller`: emits a view-backed `{Plural}Controller.cs`
pub struct MvcControllerGenerator;

impl Generator for MvcControllerGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::MvcController
    }

    fn render(&self, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        let namespace = options.namespace()?;
        let meta = options.load_model()?;
        Ok(vec![GeneratedFile::new(
            format!("{}Controller.cs", meta.plural_name()),
            mvc_controller(namespace, &meta, options.page_size),
        )])
    }

    fn help(&self) -> String {
        help_text(
            self.kind(),
            "Generates an MVC controller with CRUD operations on a model class.",
            &[MODEL_PATH_PARAM, NAMESPACE_PARAM, OUTPUT_PARAM, PAGE_SIZE_PARAM],
        )
    }
}

/// Fields and constructor shared by both controller flavours
fn controller_decl(header: String, meta: &ModelMetadata, page_size: u32) -> TypeDecl {
    let name = meta.name();
    TypeDecl::new(header)
        .declarations([format!("private const int PAGE_SIZE = {page_size};")])
        .declarations([format!("private readonly I{name}Service _service;")])
        .method(Method::new(
            format!("public {}Controller(I{name}Service service)", meta.plural_name()),
            Block::new().line("_service = service;"),
        ))
}

/// List action: searches when a term is given and the model is searchable
fn list_action(signature_name: &str, meta: &ModelMetadata, respond: &str) -> Method {
    let paging = "int page = 1, string sortField = \"\", bool asc = true";
    if meta.has_string_property() {
        Method::new(
            format!("public async Task<IActionResult> {signature_name}(string term, {paging})"),
            Block::new()
                .line("var entities = string.IsNullOrWhiteSpace(term)")
                .indented(Block::new().lines([
                    "? await _service.GetAllAsync(page, PAGE_SIZE, sortField, asc)",
                    ": await _service.SearchAsync(term, page, PAGE_SIZE, sortField, asc);",
                ]))
                .blank()
                .line(format!("return {respond}(entities);")),
        )
    } else {
        Method::new(
            format!("public async Task<IActionResult> {signature_name}({paging})"),
            Block::new()
                .line("var entities = await _service.GetAllAsync(page, PAGE_SIZE, sortField, asc);")
                .blank()
                .line(format!("return {respond}(entities);")),
        )
    }
}

/// `var entity = await _service.GetAsync(id);` with a not-found guard, then `tail`
fn found_or_404(tail: &str) -> Block {
    Block::new()
        .line("var entity = await _service.GetAsync(id);")
        .block("if (entity == null)", Block::new().line("return NotFound();"))
        .blank()
        .line(tail)
}

fn api_controller(namespace: &str, meta: &ModelMetadata, page_size: u32) -> String {
    let name = meta.name();
    let key = meta.key_name();
    let key_type = meta.key_type();

    let decl = controller_decl(
        format!("public class {}Controller : ControllerBase", meta.plural_name()),
        meta,
        page_size,
    )
    .attribute("Route(\"api/[controller]\")")
    .attribute("ApiController")
    .method(list_action("GetAll", meta, "Ok").attribute("HttpGet"))
    .method(
        Method::new(
            format!("public async Task<IActionResult> Get({key_type} id)"),
            found_or_404("return Ok(entity);"),
        )
        .attribute("HttpGet(\"{id}\")"),
    )
    .method(
        Method::new(
            format!("public async Task<IActionResult> Create({name} entity)"),
            Block::new()
                .line("var result = await _service.CreateAsync(entity);")
                .block(
                    "if (!result.IsSuccess)",
                    Block::new().line("return BadRequest(result.Errors);"),
                )
                .blank()
                .line("return Ok(result.Result);"),
        )
        .attribute("HttpPost"),
    )
    .method(
        Method::new(
            format!("public async Task<IActionResult> Update({key_type} id, {name} entity)"),
            Block::new()
                .line(format!("entity.{key} = id;"))
                .line("var result = await _service.UpdateAsync(entity);")
                .block(
                    "if (!result.IsSuccess)",
                    Block::new().line("return NotFound(result.Errors);"),
                )
                .blank()
                .line("return Ok(result.Result);"),
        )
        .attribute("HttpPut(\"{id}\")"),
    )
    .method(
        Method::new(
            format!("public async Task<IActionResult> Delete({key_type} id)"),
            Block::new()
                .line("var deleted = await _service.DeleteAsync(id);")
                .block("if (!deleted)", Block::new().line("return NotFound();"))
                .blank()
                .line("return Ok();"),
        )
        .attribute("HttpDelete(\"{id}\")"),
    );

    model_file(
        namespace,
        meta,
        &["System", "System.Threading.Tasks", "Microsoft.AspNetCore.Mvc"],
    )
    .with_type(decl)
    .render()
}

/// Model-state guard, service call and error copy of a POST action
fn mvc_post_body(service_call: &str) -> Block {
    Block::new()
        .block("if (!ModelState.IsValid)", Block::new().line("return View(entity);"))
        .blank()
        .line(format!("var result = await _service.{service_call}(entity);"))
        .block(
            "if (!result.IsSuccess)",
            Block::new()
                .block(
                    "foreach (var error in result.Errors)",
                    Block::new().line("ModelState.AddModelError(string.Empty, error);"),
                )
                .blank()
                .line("return View(entity);"),
        )
}

fn bind_parameter(name: &str, fields: &[&str]) -> String {
    if fields.is_empty() {
        format!("{name} entity")
    } else {
        format!("[Bind(\"{}\")] {name} entity", fields.join(","))
    }
}

fn mvc_controller(namespace: &str, meta: &ModelMetadata, page_size: u32) -> String {
    let name = meta.name();
    let key = meta.key_name();
    let key_type = meta.key_type();
    let filled: Vec<&str> = meta.filled_properties().map(|p| p.name()).collect();
    let editable: Vec<&str> = std::iter::once(key).chain(filled.iter().copied()).collect();
    let redirect = format!("return RedirectToAction(nameof(Details), new {{ id = result.Result.{key} }});");

    let decl = controller_decl(
        format!("public class {}Controller : Controller", meta.plural_name()),
        meta,
        page_size,
    )
    .method(list_action("Index", meta, "View"))
    .method(Method::new(
        format!("public async Task<IActionResult> Details({key_type} id)"),
        found_or_404("return View(entity);"),
    ))
    .method(Method::new(
        "public IActionResult Create()",
        Block::new().line("return View();"),
    ))
    .method(
        Method::new(
            format!(
                "public async Task<IActionResult> Create({})",
                bind_parameter(name, &filled)
            ),
            mvc_post_body("CreateAsync").blank().line(&redirect),
        )
        .attribute("HttpPost")
        .attribute("ValidateAntiForgeryToken"),
    )
    .method(Method::new(
        format!("public async Task<IActionResult> Edit({key_type} id)"),
        found_or_404("return View(entity);"),
    ))
    .method(
        Method::new(
            format!(
                "public async Task<IActionResult> Edit({})",
                bind_parameter(name, &editable)
            ),
            mvc_post_body("UpdateAsync").blank().line(&redirect),
        )
        .attribute("HttpPost")
        .attribute("ValidateAntiForgeryToken"),
    )
    .method(Method::new(
        format!("public async Task<IActionResult> Delete({key_type} id)"),
        found_or_404("return View(entity);"),
    ))
    .method(
        Method::new(
            format!("public async Task<IActionResult> DeleteConfirmed({key_type} id)"),
            Block::new()
                .line("var deleted = await _service.DeleteAsync(id);")
                .block("if (!deleted)", Block::new().line("return NotFound();"))
                .blank()
                .line("return RedirectToAction(nameof(Index));"),
        )
        .attribute("HttpPost, ActionName(\"Delete\")")
        .attribute("ValidateAntiForgeryToken"),
    );

    model_file(
        namespace,
        meta,
        &["System", "System.Threading.Tasks", "Microsoft.AspNetCore.Mvc"],
    )
    .with_type(decl)
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "namespace Blog.Models { public class Post {
        public int Id { get; set; }
        public string Title { get; set; }
        public int TotalViews { get; set; }
        public DateTime CreatedAt { get; set; }
    } }";

    const COUNTER: &str = "namespace Blog.Models { public class Counter {
        public int Id { get; set; }
        public int Value { get; set; }
    } }";

    #[test]
    fn test_api_controller_routes() {
        let meta = ModelMetadata::from_source(POST).unwrap();
        let text = api_controller("Blog.Controllers.Api", &meta, 20);
        assert!(text.contains("    [Route(\"api/[controller]\")]\n    [ApiController]\n    public class PostsController : ControllerBase\n"));
        assert!(text.contains("private const int PAGE_SIZE = 20;"));
        assert!(text.contains("[HttpGet(\"{id}\")]\n        public async Task<IActionResult> Get(int id)"));
        assert!(text.contains("return NotFound(result.Errors);"));
        assert!(text.contains("[HttpDelete(\"{id}\")]"));
        assert!(text.contains(": await _service.SearchAsync(term, page, PAGE_SIZE, sortField, asc);"));
    }

    #[test]
    fn test_mvc_controller_binds_filled_properties() {
        let meta = ModelMetadata::from_source(POST).unwrap();
        let text = mvc_controller("Blog.Controllers", &meta, 50);
        assert!(text.contains("Create([Bind(\"Title,TotalViews\")] Post entity)"));
        assert!(text.contains("Edit([Bind(\"Id,Title,TotalViews\")] Post entity)"));
        assert!(text.contains("[HttpPost, ActionName(\"Delete\")]\n        [ValidateAntiForgeryToken]\n        public async Task<IActionResult> DeleteConfirmed(int id)"));
        assert!(text.contains("private const int PAGE_SIZE = 50;"));
        assert!(text.contains("new { id = result.Result.Id }"));
        assert!(text.contains("ModelState.AddModelError(string.Empty, error);"));
    }

    #[test]
    fn test_list_action_without_string_property_has_no_term() {
        let meta = ModelMetadata::from_source(COUNTER).unwrap();
        let text = mvc_controller("Blog", &meta, 20);
        assert!(text.contains("public async Task<IActionResult> Index(int page = 1, string sortField = \"\", bool asc = true)"));
        assert!(!text.contains("SearchAsync"));
        assert!(text.contains("public class CountersController : Controller"));
    }
}
