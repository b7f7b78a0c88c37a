//! `servicegen`: service interface and Entity Framework implementation.

use tracing::debug;

use super::emit::{Block, Method, TypeDecl};
use super::support::{page_model_files, result_model_file};
use super::{help_text, model_file, GeneratedFile, Generator, GeneratorKind, GeneratorOptions};
use super::{DB_CONTEXT_PARAM, MODEL_PATH_PARAM, NAMESPACE_PARAM, OUTPUT_PARAM};
use crate::error::Result;
use crate::model::ModelMetadata;

/// Error message returned by `UpdateAsync` for a missing key
pub const ENTITY_NOT_FOUND: &str = "The entity was not found.";

/// `servicegen`: emits `I{Name}Service.cs` and `{Name}Service.cs`
///
/// Optionally composes [`super::PageModelGenerator`] and
/// [`super::ResultModelGenerator`] output into the same run.
pub struct ServiceGenerator;

impl Generator for ServiceGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Service
    }

    fn render(&self, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        let namespace = options.namespace()?;
        let meta = options.load_model()?;
        debug!(
            model = %meta.name(),
            searchable = meta.has_string_property(),
            "rendering service"
        );

        let mut files = vec![
            GeneratedFile::new(
                format!("I{}Service.cs", meta.name()),
                interface_file(namespace, &meta),
            ),
            GeneratedFile::new(
                format!("{}Service.cs", meta.name()),
                class_file(namespace, &meta, &options.db_context),
            ),
        ];
        if options.generate_page_model {
            files.extend(page_model_files(namespace)?);
        }
        if options.generate_result_model {
            files.push(result_model_file(namespace)?);
        }
        Ok(files)
    }

    fn help(&self) -> String {
        help_text(
            self.kind(),
            "Generates a service layer based on a model class.",
            &[
                MODEL_PATH_PARAM,
                NAMESPACE_PARAM,
                OUTPUT_PARAM,
                ("-gpm|--generate-page-model", "Generate page model."),
                ("-grm|--generate-result-model", "Generate result model."),
                DB_CONTEXT_PARAM,
            ],
        )
    }
}

/// Signatures shared by the interface and the class, in declaration order
struct Signatures {
    create: String,
    delete: String,
    get: String,
    get_all: String,
    get_page: String,
    search: Option<(String, String)>,
    update: String,
}

impl Signatures {
    fn new(meta: &ModelMetadata) -> Self {
        let name = meta.name();
        let key_type = meta.key_type();
        Signatures {
            create: format!("Task<ResultModel<{name}>> CreateAsync({name} model)"),
            delete: format!("Task<bool> DeleteAsync({key_type} key)"),
            get: format!("Task<{name}> GetAsync({key_type} key)"),
            get_all: format!("Task<List<{name}>> GetAllAsync()"),
            get_page: format!(
                "Task<PageModel<{name}>> GetAllAsync(int page, int pageSize, string sortField, bool asc)"
            ),
            search: meta.has_string_property().then(|| {
                (
                    format!("Task<List<{name}>> SearchAsync(string term)"),
                    format!(
                        "Task<PageModel<{name}>> SearchAsync(string term, int page, int pageSize, string sortField, bool asc)"
                    ),
                )
            }),
            update: format!("Task<ResultModel<{name}>> UpdateAsync({name} model)"),
        }
    }
}

fn interface_file(namespace: &str, meta: &ModelMetadata) -> String {
    let sig = Signatures::new(meta);
    let mut methods = vec![
        Method::declaration(&sig.create),
        Method::declaration(&sig.delete),
        Method::declaration(&sig.get),
        Method::declaration(&sig.get_all),
        Method::declaration(&sig.get_page),
    ];
    if let Some((search, search_page)) = &sig.search {
        methods.push(Method::declaration(search));
        methods.push(Method::declaration(search_page));
    }
    methods.push(Method::declaration(&sig.update));

    let decl = TypeDecl::new(format!("public interface I{}Service", meta.name())).methods(methods);

    model_file(
        namespace,
        meta,
        &["System", "System.Collections.Generic", "System.Threading.Tasks"],
    )
    .with_type(decl)
    .render()
}

fn class_file(namespace: &str, meta: &ModelMetadata, db_context: &str) -> String {
    let name = meta.name();
    let sig = Signatures::new(meta);
    let set = format!("_context.{}", meta.plural_name());
    let key = meta.key_name();

    let mut decl = TypeDecl::new(format!("public class {name}Service : I{name}Service"))
        .declarations([format!("private readonly {db_context} _context;")])
        .method(Method::new(
            format!("public {name}Service({db_context} context)"),
            Block::new().line("_context = context;"),
        ))
        .method(Method::new(
            format!("public async {}", sig.create),
            create_body(meta, &set),
        ))
        .method(Method::new(
            format!("public async {}", sig.delete),
            Block::new()
                .line("var entity = await GetAsync(key);")
                .block("if (entity == null)", Block::new().line("return false;"))
                .blank()
                .line(format!("{set}.Remove(entity);"))
                .line("await _context.SaveChangesAsync();")
                .blank()
                .line("return true;"),
        ))
        .method(Method::new(
            format!("public {}", sig.get),
            Block::new().line(format!("return {set}.FirstOrDefaultAsync(f => f.{key} == key);")),
        ))
        .method(Method::new(
            format!("public {}", sig.get_all),
            Block::new().line(format!("return {set}.AsNoTracking().ToListAsync();")),
        ))
        .method(Method::new(
            format!("public {}", sig.get_page),
            paged_body(name, &format!("{set}.AsNoTracking()")),
        ));

    if let Some((search, search_page)) = &sig.search {
        let filtered = format!("{set}.AsNoTracking().Where({})", search_predicate(meta));
        decl = decl
            .method(Method::new(
                format!("public {search}"),
                Block::new().line(format!("return {filtered}.ToListAsync();")),
            ))
            .method(Method::new(
                format!("public {search_page}"),
                paged_body(name, &filtered),
            ));
    }

    decl = decl
        .method(Method::new(
            format!("public async {}", sig.update),
            update_body(meta),
        ))
        .method(Method::new(
            format!(
                "private static IQueryable<{name}> GetSortedQuery(IQueryable<{name}> query, string sortField, bool asc)"
            ),
            sorted_query_body(meta),
        ));

    model_file(
        namespace,
        meta,
        &[
            "System",
            "System.Collections.Generic",
            "System.Linq",
            "System.Threading.Tasks",
            "Microsoft.EntityFrameworkCore",
        ],
    )
    .with_type(decl)
    .render()
}

/// `w => w.A.Contains(term) || w.B.Contains(term)` over every string property
fn search_predicate(meta: &ModelMetadata) -> String {
    let terms: Vec<String> = meta
        .string_properties()
        .map(|p| format!("w.{}.Contains(term)", p.name()))
        .collect();
    format!("w => {}", terms.join(" || "))
}

fn timestamp_lines(meta: &ModelMetadata, target: &str, creating: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if creating && meta.has_created_at() {
        lines.push(format!("{target}.CreatedAt = DateTime.UtcNow;"));
    }
    if meta.has_updated_at() {
        lines.push(format!("{target}.UpdatedAt = DateTime.UtcNow;"));
    }
    lines
}

fn copy_lines<'a>(meta: &'a ModelMetadata, target: &'a str) -> impl Iterator<Item = String> + 'a {
    meta.filled_properties()
        .map(move |p| format!("{target}.{0} = model.{0};", p.name()))
}

fn create_body(meta: &ModelMetadata, set: &str) -> Block {
    let name = meta.name();
    Block::new()
        .line(format!("var newEntity = new {name}();"))
        .blank()
        .lines(copy_lines(meta, "newEntity"))
        .lines(timestamp_lines(meta, "newEntity", true))
        .blank()
        .line(format!("{set}.Add(newEntity);"))
        .line("await _context.SaveChangesAsync();")
        .blank()
        .line(format!("return new ResultModel<{name}>(newEntity);"))
}

fn update_body(meta: &ModelMetadata) -> Block {
    let name = meta.name();
    Block::new()
        .line(format!("var existingEntity = await GetAsync(model.{});", meta.key_name()))
        .block(
            "if (existingEntity == null)",
            Block::new().line(format!("return new ResultModel<{name}>(\"{ENTITY_NOT_FOUND}\");")),
        )
        .blank()
        .lines(copy_lines(meta, "existingEntity"))
        .lines(timestamp_lines(meta, "existingEntity", false))
        .blank()
        .line("await _context.SaveChangesAsync();")
        .blank()
        .line(format!("return new ResultModel<{name}>(existingEntity);"))
}

fn paged_body(name: &str, query: &str) -> Block {
    Block::new()
        .line(format!("var query = {query};"))
        .line("query = GetSortedQuery(query, sortField, asc);")
        .blank()
        .line(format!(
            "return PageModel<{name}>.CreateAsync(query, page, pageSize, sortField, asc);"
        ))
}

/// One `case` per non-key property, default ordering by key
fn sorted_query_body(meta: &ModelMetadata) -> Block {
    let key = meta.key_name();
    let cases = meta.non_key_properties().fold(Block::new(), |block, p| {
        let field = p.name();
        block.line(format!("case \"{field}\":")).indented(
            Block::new().line("return asc").indented(
                Block::new()
                    .line("? query")
                    .indented(Block::new().lines([
                        format!(".OrderBy(o => o.{field})"),
                        format!(".ThenBy(o => o.{key})"),
                    ]))
                    .line(": query")
                    .indented(Block::new().lines([
                        format!(".OrderByDescending(o => o.{field})"),
                        format!(".ThenBy(o => o.{key});"),
                    ])),
            ),
        )
    });
    let default = Block::new().line("default:").indented(
        Block::new().line("return asc").indented(Block::new().lines([
            format!("? query.OrderBy(o => o.{key})"),
            format!(": query.OrderByDescending(o => o.{key});"),
        ])),
    );
    Block::new().block("switch (sortField)", cases.append(default))
}
