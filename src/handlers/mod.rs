pub mod acoes;
pub mod auth;
pub mod comunidades;
pub mod dashboard;
pub mod eventos;
pub mod locais;
pub mod pastorais;
pub mod pessoas;
