pub mod author;
pub mod book;
pub mod bookinstance;
pub mod genre;
pub mod language;

use biblio_kernel::ModuleRegistry;

/// Register every catalog resource module with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(author::create_module());
    registry.register(genre::create_module());
    registry.register(language::create_module());
    registry.register(book::create_module());
    registry.register(bookinstance::create_module());
}
