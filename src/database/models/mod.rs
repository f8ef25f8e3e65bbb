pub mod acao;
pub mod comunidade;
pub mod evento;
pub mod local;
pub mod pastoral;
pub mod perfil;
pub mod pessoa;
pub mod usuario;
