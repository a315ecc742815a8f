pub mod seaorm;

pub use seaorm::SeaOrmCakeRepository;
