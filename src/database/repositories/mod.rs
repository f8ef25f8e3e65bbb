pub mod acoes;
pub mod comunidades;
pub mod eventos;
pub mod locais;
pub mod pastorais;
pub mod pessoas;
